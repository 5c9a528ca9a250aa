//! # pay-core
//!
//! Platform-free core of the pay-widget checkout button.
//!
//! This crate provides:
//! - `WidgetConfig`, `VariantSet` and `Price` for what is being sold
//! - `WidgetSettings` for SDK timing, contact channels and button style
//! - `await_readiness` and the `Scheduler` trait for waiting on the SDK
//! - `VariantSelection` and `build_selector` for the optional dropdown
//! - `MountController` for the button region's lifecycle
//! - `PaymentButton` for order creation, capture-then-success, and errors
//! - `PaymentSdk`, `MountPoint` and `Notifier` traits for the host to implement
//! - `WidgetError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{mount_widget, WidgetConfig, WidgetEnv, WidgetSettings};
//!
//! let env = WidgetEnv::new(sdk, scheduler, notifier, WidgetSettings::default());
//! let widget = mount_widget(container, WidgetConfig::new("25.00", "Widget"), env)?;
//!
//! // Button renders as soon as the SDK is on the page,
//! // or the fallback notice after the wait budget runs out.
//! println!("{}", widget.state());
//! ```

pub mod button;
pub mod config;
pub mod error;
pub mod fallback;
pub mod mount;
pub mod order;
pub mod product;
pub mod readiness;
pub mod sdk;
pub mod selector;
pub mod widget;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use button::{Notifier, PaymentButton, PriceResolver};
pub use config::{ButtonStyle, ContactSettings, SdkSettings, WidgetSettings};
pub use error::{WidgetError, WidgetResult};
pub use fallback::{render_unavailable, UnavailableNotice};
pub use mount::{MountController, MountPoint, MountState};
pub use order::{
    Amount, Approval, CapturedPayment, CheckoutOutcome, OrderIntent, Receipt, ORDER_CURRENCY,
};
pub use product::{
    Price, Variant, VariantSet, WidgetConfig, DEFAULT_DESCRIPTION, DEFAULT_OPTION_LABEL, DEFAULT_PRICE,
};
pub use readiness::{await_readiness, PollHandle, PollOptions, Readiness, Scheduler};
pub use sdk::PaymentSdk;
pub use selector::{build_selector, SelectOption, SelectorView, VariantSelection};
pub use widget::{mount_widget, Widget, WidgetEnv};
