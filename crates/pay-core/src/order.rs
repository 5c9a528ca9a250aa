//! # Order Types
//!
//! Per-attempt checkout data. An `OrderIntent` is built when the buyer clicks
//! the button and handed straight to the provider; `Approval` and
//! `CapturedPayment` come back from it; `CheckoutOutcome` is what the widget
//! makes of them. None of this is persisted.

use crate::error::WidgetError;
use crate::product::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Currency every order is placed in
pub const ORDER_CURRENCY: &str = "USD";

/// Amount of an order line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: Price,
    pub currency: String,
}

impl Amount {
    pub fn usd(value: Price) -> Self {
        Self {
            value,
            currency: ORDER_CURRENCY.to_string(),
        }
    }
}

/// What the buyer is about to pay for, built fresh on every click
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Client-side id for correlating log lines; never sent to the provider
    #[serde(skip)]
    pub attempt_id: String,

    pub description: String,
    pub amount: Amount,
}

impl OrderIntent {
    pub fn new(description: impl Into<String>, value: Price) -> Self {
        Self {
            attempt_id: Uuid::new_v4().to_string(),
            description: description.into(),
            amount: Amount::usd(value),
        }
    }
}

/// Buyer approval as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,
}

impl Approval {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            payer_id: None,
        }
    }
}

/// Provider-neutral view of a successful capture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPayment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_given_name: Option<String>,
}

/// Proof of a completed payment shown to the buyer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_id: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl Receipt {
    pub fn new(approval: &Approval, capture: CapturedPayment) -> Self {
        Self {
            order_id: approval.order_id.clone(),
            payer_given_name: capture.payer_given_name,
            capture_id: capture.capture_id,
            completed_at: Utc::now(),
        }
    }

    /// e.g. "Transaction completed by Ada! Order ID: 5O190127TN364715T"
    pub fn message(&self) -> String {
        match self.payer_given_name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => format!(
                "Transaction completed by {}! Order ID: {}",
                name, self.order_id
            ),
            None => format!("Transaction completed! Order ID: {}", self.order_id),
        }
    }
}

/// Result of one checkout attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Success(Receipt),
    Failure(WidgetError),
}

impl CheckoutOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckoutOutcome::Success(_))
    }
}
