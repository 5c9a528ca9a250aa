use pay_core::Notifier;
use pay_paypal::bindings::describe_js_error;
use tracing::warn;

/// `window.alert` and `location.href`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            warn!(message, "No window to alert");
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            warn!(error = %describe_js_error(&e), message, "Alert suppressed");
        }
    }

    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            warn!(url, "No window to navigate");
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            warn!(error = %describe_js_error(&e), url, "Navigation refused");
        }
    }
}
