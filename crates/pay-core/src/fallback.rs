//! # Fallback Notice
//!
//! Static replacement for the button when the SDK never shows up.

use crate::config::ContactSettings;
use crate::mount::MountPoint;
use serde::{Deserialize, Serialize};

/// Inert "payments unavailable" message with alternate channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableNotice {
    /// e.g. "PayPal Payment Temporarily Unavailable"
    pub title: String,

    /// Sentence leading up to the email address
    pub lead: String,

    /// Rendered as a `mailto:` link
    pub support_email: String,
}

impl UnavailableNotice {
    pub fn new(provider: &str, contact: &ContactSettings) -> Self {
        let lead = match contact.alternate() {
            Some(channel) => format!("Please use {} or contact us directly at ", channel),
            None => "Please contact us directly at ".to_string(),
        };
        Self {
            title: format!("{} Payment Temporarily Unavailable", provider),
            lead,
            support_email: contact.support_email.clone(),
        }
    }

    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.support_email)
    }

    /// Plain-text rendering of the body
    pub fn text(&self) -> String {
        format!("{}{}", self.lead, self.support_email)
    }
}

/// Replace whatever `target` holds with the unavailable notice.
pub fn render_unavailable<T: MountPoint>(target: &T, provider: &str, contact: &ContactSettings) {
    target.show_notice(&UnavailableNotice::new(provider, contact));
}
