//! # Payment SDK Trait
//!
//! The seam between the widget and the provider's client-side SDK.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 PaymentSdk<T> (trait)                    │
//! │  ├── is_ready()        is the SDK global on the page?    │
//! │  ├── render_button()   factory call bound to a button    │
//! │  └── release()         drop the previous button instance │
//! └──────────────────────────────────────────────────────────┘
//!                           ▲
//!             ┌─────────────┴─────────────┐
//!      ┌──────┴──────┐             ┌──────┴──────┐
//!      │  PaypalSdk  │             │ ScriptedSdk │
//!      │ (pay-paypal)│             │   (tests)   │
//!      └─────────────┘             └─────────────┘
//! ```

use crate::button::PaymentButton;
use crate::error::WidgetResult;
use crate::mount::MountPoint;
use std::rc::Rc;

/// A client-side payment SDK able to render a checkout button into `T`.
pub trait PaymentSdk<T: MountPoint>: 'static {
    /// Display name used in logs and the unavailable notice (e.g. "PayPal")
    fn provider_name(&self) -> &'static str;

    /// Whether the SDK's global handle exists yet
    fn is_ready(&self) -> bool;

    /// Render a button into `target` whose callbacks delegate to `button`.
    ///
    /// Returns once the render has been dispatched; the SDK finishes it on
    /// its own schedule.
    fn render_button(&self, target: &T, button: Rc<PaymentButton>) -> WidgetResult<()>;

    /// Forget any button previously rendered into `target`.
    fn release(&self, _target: &T) {}
}
