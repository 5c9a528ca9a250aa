//! # pay-paypal
//!
//! PayPal JS SDK provider for the pay-widget checkout button.
//!
//! - `bindings`: `wasm-bindgen` imports for `paypal.Buttons` and `actions.order`
//! - `wire`: JSON shapes the SDK sends and expects
//! - `buttons`: `PaypalSdk`, the `PaymentSdk` implementation
//!
//! The SDK script itself is loaded by the host page; `PaypalSdk::is_ready`
//! only reports whether its global has appeared yet.

pub mod bindings;
pub mod buttons;
pub mod wire;

pub use buttons::{PaypalSdk, PROVIDER};
pub use wire::{ApproveData, CancelData, CaptureResponse, OrderRequest};
