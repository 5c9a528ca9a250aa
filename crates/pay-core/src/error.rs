//! # Widget Error Types
//!
//! Typed error handling for the checkout widget.
//! Every fallible widget operation returns `Result<T, WidgetError>`.

use crate::config::ContactSettings;
use thiserror::Error;

/// Core error type for all widget operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The container selector matched nothing on the page
    #[error("Container not found: {selector}")]
    ContainerNotFound { selector: String },

    /// The payment SDK never attached itself to the page
    #[error("Payment SDK unavailable after {waited_ms} ms")]
    SdkUnavailable { waited_ms: u32 },

    /// The SDK rejected or failed the order creation step
    #[error("Order creation failed: {0}")]
    OrderCreationFailed(String),

    /// The SDK failed to capture an approved order
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// Variant options are empty or unusable
    #[error("Malformed variant config: {0}")]
    MalformedVariantConfig(String),

    /// Invalid widget settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Any other error reported by the payment provider
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The host document refused a DOM operation
    #[error("DOM error: {0}")]
    Dom(String),
}

impl WidgetError {
    /// Returns true if the widget may repeat the failed step on its own.
    ///
    /// Payment intents are not safe to resubmit without the buyer clicking
    /// again, so nothing in the payment flow qualifies.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Returns true if this error belongs to a single checkout attempt
    /// rather than to the widget as a whole.
    pub fn is_payment_failure(&self) -> bool {
        matches!(
            self,
            WidgetError::OrderCreationFailed(_)
                | WidgetError::CaptureFailed(_)
                | WidgetError::Provider { .. }
        )
    }

    /// Message shown to the buyer, always pointing at a contact channel
    pub fn user_message(&self, contact: &ContactSettings) -> String {
        match self {
            WidgetError::SdkUnavailable { .. } => match contact.alternate() {
                Some(channel) => format!(
                    "Online payment is temporarily unavailable. Please use {} or contact us at {}",
                    channel, contact.support_email
                ),
                None => format!(
                    "Online payment is temporarily unavailable. Please contact us at {}",
                    contact.support_email
                ),
            },
            _ => format!(
                "Payment error occurred. Please try again or contact us at {}",
                contact.support_email
            ),
        }
    }
}

/// Result type alias for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;
