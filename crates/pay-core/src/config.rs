//! # Widget Settings
//!
//! Host-page tunables: SDK lookup and timing, contact channels shown on
//! failure, where to send the buyer after a completed payment, and button
//! appearance. Every field has a default so a host may pass nothing at all.

use crate::error::{WidgetError, WidgetResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Settings for locating the payment SDK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkSettings {
    /// Global the SDK attaches itself to (`window.paypal` unless the page
    /// loads the SDK with a custom namespace)
    pub global_name: String,

    /// How often to look for the global
    pub poll_interval_ms: u32,

    /// How long to wait before falling back
    pub max_wait_ms: u32,
}

impl Default for SdkSettings {
    fn default() -> Self {
        Self {
            global_name: "paypal".to_string(),
            poll_interval_ms: 100,
            max_wait_ms: 5000,
        }
    }
}

/// Where buyers are pointed when something goes wrong
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub support_email: String,

    /// Another way to pay, e.g. "Zelle (555-010-0000)"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_channel: Option<String>,
}

impl ContactSettings {
    /// The alternate channel, ignoring blank entries
    pub fn alternate(&self) -> Option<&str> {
        self.alternate_channel
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            support_email: "support@example.com".to_string(),
            alternate_channel: None,
        }
    }
}

/// Appearance hints forwarded to the provider's button factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonStyle {
    pub layout: String,
    pub color: String,
    pub shape: String,
    pub label: String,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            layout: "vertical".to_string(),
            color: "blue".to_string(),
            shape: "rect".to_string(),
            label: "pay".to_string(),
        }
    }
}

/// Complete widget settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub sdk: SdkSettings,
    pub contact: ContactSettings,

    /// Page to open once a payment is captured
    pub success_url: String,

    pub button_style: ButtonStyle,

    /// `tracing` filter directive for the console logger
    pub log_level: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            sdk: SdkSettings::default(),
            contact: ContactSettings::default(),
            success_url: "../index.html?payment=success".to_string(),
            button_style: ButtonStyle::default(),
            log_level: "info".to_string(),
        }
    }
}

impl WidgetSettings {
    /// Load settings from a TOML string
    pub fn from_toml(toml_str: &str) -> WidgetResult<Self> {
        let settings: Self =
            toml::from_str(toml_str).map_err(|e| WidgetError::Configuration(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Builder: set support email
    pub fn with_support_email(mut self, email: impl Into<String>) -> Self {
        self.contact.support_email = email.into();
        self
    }

    /// Builder: set alternate payment channel
    pub fn with_alternate_channel(mut self, channel: impl Into<String>) -> Self {
        self.contact.alternate_channel = Some(channel.into());
        self
    }

    /// Builder: set SDK wait budget
    pub fn with_max_wait_ms(mut self, max_wait_ms: u32) -> Self {
        self.sdk.max_wait_ms = max_wait_ms;
        self
    }

    /// Builder: set success URL
    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = url.into();
        self
    }

    pub fn validate(&self) -> WidgetResult<()> {
        if self.sdk.poll_interval_ms == 0 {
            return Err(WidgetError::Configuration(
                "sdk.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.sdk.poll_interval_ms > self.sdk.max_wait_ms {
            return Err(WidgetError::Configuration(format!(
                "sdk.poll_interval_ms ({}) exceeds sdk.max_wait_ms ({})",
                self.sdk.poll_interval_ms, self.sdk.max_wait_ms
            )));
        }
        if self.sdk.global_name.trim().is_empty() {
            return Err(WidgetError::Configuration(
                "sdk.global_name must not be empty".to_string(),
            ));
        }
        if self.contact.support_email.trim().is_empty() {
            return Err(WidgetError::Configuration(
                "contact.support_email must not be empty".to_string(),
            ));
        }
        if self.contact.alternate().is_none() {
            warn!(
                support_email = %self.contact.support_email,
                "No contact.alternate_channel; the unavailable notice will only offer email"
            );
        }
        Ok(())
    }
}
