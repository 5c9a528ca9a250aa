//! # pay-wasm
//!
//! Browser entry point for the pay-widget checkout button.
//!
//! Loading the module installs `window.renderPayPal`, which mounts a PayPal
//! button (and an optional variant dropdown) into any container on the page.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init from './pkg/pay_wasm.js';
//!
//! await init();
//!
//! const widget = window.renderPayPal('#shirt', {
//!   price: '25.00',
//!   description: 'T-Shirt',
//!   productOptions: {
//!     label: 'Size',
//!     choices: [
//!       { name: 'Small', price: '10.00' },
//!       { name: 'Large', price: '15.00' },
//!     ],
//!   },
//! }, {
//!   contact: { support_email: 'orders@example.com' },
//! });
//!
//! console.log(widget?.state());
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build crates/pay-wasm --target web
//! ```

pub mod dom;
pub mod logging;
pub mod notify;
pub mod timer;

use dom::DomMountPoint;
use notify::BrowserNotifier;
use pay_core::{
    mount_widget, Notifier, Widget, WidgetConfig, WidgetEnv, WidgetError, WidgetResult,
    WidgetSettings,
};
use pay_paypal::PaypalSdk;
use std::rc::Rc;
use timer::BrowserScheduler;
use tracing::{error, info};
use wasm_bindgen::prelude::*;

/// Name of the global installed on `window`
pub const ENTRY_GLOBAL: &str = "renderPayPal";

type BrowserWidget = Widget<DomMountPoint, PaypalSdk, BrowserScheduler>;

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if let Err(err) = install_global() {
        web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
    }
}

fn install_global() -> WidgetResult<()> {
    let window = web_sys::window().ok_or_else(|| WidgetError::Dom("no window".into()))?;
    let entry = Closure::<dyn Fn(String, JsValue, JsValue) -> JsValue>::new(
        |selector: String, options: JsValue, settings: JsValue| {
            render_paypal(&selector, options, settings)
                .map(JsValue::from)
                .unwrap_or(JsValue::UNDEFINED)
        },
    );
    js_sys::Reflect::set(
        &window,
        &JsValue::from_str(ENTRY_GLOBAL),
        &entry.into_js_value(),
    )
    .map(|_| ())
    .map_err(dom::dom_error)
}

/// A mounted checkout button, as seen from JavaScript
#[wasm_bindgen]
pub struct WidgetHandle {
    widget: BrowserWidget,
}

#[wasm_bindgen]
impl WidgetHandle {
    /// "empty", "pending", "rendered" or "unavailable"
    pub fn state(&self) -> String {
        self.widget.state().as_str().to_string()
    }

    /// Price the next order would carry
    #[wasm_bindgen(js_name = selectedPrice)]
    pub fn selected_price(&self) -> String {
        self.widget.selected_price().as_str().to_string()
    }

    /// Clear the button region and render again
    pub fn remount(&self) {
        self.widget.remount();
    }
}

/// Mount a checkout button into the element matching `selector`.
///
/// `options` is `{ price, description, productOptions? }`; `settings` is an
/// optional `WidgetSettings` object. Returns `undefined` when the container
/// is missing or either argument is malformed; the reason goes to the console.
#[wasm_bindgen(js_name = renderPayPal)]
pub fn render_paypal(selector: &str, options: JsValue, settings: JsValue) -> Option<WidgetHandle> {
    let settings = match parse_settings(settings) {
        Ok(settings) => settings,
        Err(err) => {
            logging::init(&WidgetSettings::default().log_level);
            error!(error = %err, "Rejected widget settings");
            return None;
        }
    };
    logging::init(&settings.log_level);

    match mount(selector, options, settings) {
        Ok(widget) => {
            info!(selector, state = %widget.state(), "renderPayPal");
            Some(WidgetHandle { widget })
        }
        Err(err) => {
            error!(selector, error = %err, "PayPal widget not mounted");
            None
        }
    }
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_settings(settings: JsValue) -> WidgetResult<WidgetSettings> {
    if settings.is_undefined() || settings.is_null() {
        return Ok(WidgetSettings::default());
    }
    let settings: WidgetSettings = serde_wasm_bindgen::from_value(settings)
        .map_err(|e| WidgetError::Configuration(e.to_string()))?;
    settings.validate()?;
    Ok(settings)
}

fn parse_options(options: JsValue) -> WidgetResult<WidgetConfig> {
    if options.is_undefined() || options.is_null() {
        return Ok(WidgetConfig::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| WidgetError::Serialization(e.to_string()))
}

fn mount(selector: &str, options: JsValue, settings: WidgetSettings) -> WidgetResult<BrowserWidget> {
    let root = DomMountPoint::resolve(selector)?;
    let config = parse_options(options)?;

    let env = WidgetEnv::new(
        Rc::new(PaypalSdk::from_settings(&settings.sdk)),
        Rc::new(BrowserScheduler),
        Rc::new(BrowserNotifier) as Rc<dyn Notifier>,
        settings,
    );
    mount_widget(root, config, env)
}
