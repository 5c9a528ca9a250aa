//! # Payment Button Adapter
//!
//! Provider-neutral behaviour behind a rendered checkout button. The
//! provider binding forwards its three SDK callbacks here:
//!
//! - order creation → [`PaymentButton::create_order`]
//! - approval, after the capture step settled → [`PaymentButton::approve`]
//! - SDK error → [`PaymentButton::fail`]
//!
//! `approve` takes the capture result as an argument, so success cannot be
//! reported before the capture finished. Failures are never retried here;
//! the buyer has to click again.

use crate::config::{ButtonStyle, ContactSettings, WidgetSettings};
use crate::error::WidgetError;
use crate::order::{Approval, CapturedPayment, CheckoutOutcome, OrderIntent, Receipt};
use crate::product::Price;
use std::rc::Rc;
use tracing::{error, info, instrument, warn};

/// Returns the price that applies right now
pub type PriceResolver = Rc<dyn Fn() -> Price>;

/// User-visible side effects of a checkout attempt
pub trait Notifier {
    /// Show a blocking message to the buyer
    fn alert(&self, message: &str);

    /// Leave the page
    fn navigate(&self, url: &str);
}

/// Behaviour bound to one rendered button
pub struct PaymentButton {
    provider: &'static str,
    description: String,
    resolver: PriceResolver,
    contact: ContactSettings,
    success_url: String,
    style: ButtonStyle,
    notifier: Rc<dyn Notifier>,
}

impl PaymentButton {
    pub fn new(
        provider: &'static str,
        description: impl Into<String>,
        resolver: PriceResolver,
        settings: &WidgetSettings,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            provider,
            description: description.into(),
            resolver,
            contact: settings.contact.clone(),
            success_url: settings.success_url.clone(),
            style: settings.button_style.clone(),
            notifier,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    /// Price the next order would be created with
    pub fn current_price(&self) -> Price {
        (self.resolver)()
    }

    /// Build the order for a click. The price is resolved now, not at render.
    #[instrument(skip(self), fields(provider = self.provider))]
    pub fn create_order(&self) -> OrderIntent {
        let intent = OrderIntent::new(self.description.clone(), self.current_price());
        info!(
            attempt_id = %intent.attempt_id,
            amount = %intent.amount.value,
            currency = %intent.amount.currency,
            "Creating order"
        );
        intent
    }

    /// Finish an approved order once the provider's capture step settled.
    #[instrument(skip(self, capture), fields(provider = self.provider, order_id = %approval.order_id))]
    pub fn approve(
        &self,
        approval: &Approval,
        capture: Result<CapturedPayment, WidgetError>,
    ) -> CheckoutOutcome {
        match capture {
            Ok(captured) => {
                let receipt = Receipt::new(approval, captured);
                info!(capture_id = ?receipt.capture_id, "Payment captured");
                self.notifier.alert(&receipt.message());
                self.notifier.navigate(&self.success_url);
                CheckoutOutcome::Success(receipt)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Surface a failed attempt. The button stays usable for a fresh click.
    ///
    /// Declines and provider errors belong to one attempt and log at warn;
    /// anything else points at the integration and logs at error.
    pub fn fail(&self, err: WidgetError) -> CheckoutOutcome {
        if err.is_payment_failure() {
            warn!(provider = self.provider, error = %err, "Payment attempt failed");
        } else {
            error!(provider = self.provider, error = %err, "Payment attempt could not be handled");
        }
        self.notifier.alert(&err.user_message(&self.contact));
        CheckoutOutcome::Failure(err)
    }

    /// The buyer closed the provider's window without paying
    pub fn cancelled(&self, order_id: Option<&str>) {
        info!(provider = self.provider, order_id = ?order_id, "Checkout cancelled by buyer");
    }
}

impl std::fmt::Debug for PaymentButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentButton")
            .field("provider", &self.provider)
            .field("description", &self.description)
            .field("price", &self.current_price())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingNotifier;
    use std::cell::RefCell;

    fn button(price: Rc<RefCell<Price>>, notifier: Rc<RecordingNotifier>) -> PaymentButton {
        let settings = WidgetSettings::default()
            .with_support_email("help@shop.test")
            .with_success_url("/done");
        PaymentButton::new(
            "PayPal",
            "Widget",
            Rc::new(move || price.borrow().clone()),
            &settings,
            notifier,
        )
    }

    #[test]
    fn test_price_resolved_at_click() {
        let price = Rc::new(RefCell::new(Price::new("10.00")));
        let b = button(Rc::clone(&price), Rc::new(RecordingNotifier::default()));

        *price.borrow_mut() = Price::new("15.00");
        let intent = b.create_order();

        assert_eq!(intent.amount.value.as_str(), "15.00");
        assert_eq!(intent.description, "Widget");
    }

    #[test]
    fn test_approve_after_capture() {
        let notifier = Rc::new(RecordingNotifier::default());
        let b = button(Rc::new(RefCell::new(Price::new("1.00"))), Rc::clone(&notifier));

        let outcome = b.approve(
            &Approval::new("ORDER-9"),
            Ok(CapturedPayment {
                payer_given_name: Some("Grace".into()),
                ..Default::default()
            }),
        );

        assert!(outcome.is_success());
        assert_eq!(
            notifier.alerts(),
            vec!["Transaction completed by Grace! Order ID: ORDER-9".to_string()]
        );
        assert_eq!(notifier.navigations(), vec!["/done".to_string()]);
    }

    #[test]
    fn test_capture_failure_stays_put() {
        let notifier = Rc::new(RecordingNotifier::default());
        let b = button(Rc::new(RefCell::new(Price::new("1.00"))), Rc::clone(&notifier));

        let outcome = b.approve(
            &Approval::new("ORDER-9"),
            Err(WidgetError::CaptureFailed("INSTRUMENT_DECLINED".into())),
        );

        assert!(!outcome.is_success());
        assert!(notifier.navigations().is_empty());
        let alerts = notifier.alerts();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("help@shop.test"));
        assert!(!alerts[0].contains("completed"));
    }

    #[test]
    fn test_fail_alerts_for_every_error_kind() {
        let notifier = Rc::new(RecordingNotifier::default());
        let b = button(Rc::new(RefCell::new(Price::new("1.00"))), Rc::clone(&notifier));

        let declined = WidgetError::CaptureFailed("INSTRUMENT_DECLINED".into());
        let malformed = WidgetError::Serialization("missing orderID".into());
        assert!(declined.is_payment_failure());
        assert!(!malformed.is_payment_failure());

        assert!(matches!(b.fail(declined), CheckoutOutcome::Failure(WidgetError::CaptureFailed(_))));
        assert!(matches!(b.fail(malformed), CheckoutOutcome::Failure(WidgetError::Serialization(_))));

        assert_eq!(notifier.alerts().len(), 2);
        assert!(notifier.alerts().iter().all(|a| a.contains("help@shop.test")));
        assert!(notifier.navigations().is_empty());
    }
}
