//! Low-level `wasm-bindgen` bindings to the PayPal JS SDK.
//!
//! Only the surface the checkout button needs: the `paypal.Buttons` factory,
//! the button instance, and the `actions.order` helpers handed to callbacks.

use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    /// The SDK namespace (`window.paypal` by default)
    #[derive(Debug, Clone)]
    pub type PaypalNamespace;

    /// `paypal.Buttons(options)` → `PaypalButtons`
    #[wasm_bindgen(method, catch, js_name = Buttons)]
    pub fn buttons(this: &PaypalNamespace, options: &Object) -> Result<PaypalButtons, JsValue>;

    /// A button instance, not yet attached
    #[derive(Debug, Clone)]
    pub type PaypalButtons;

    /// `buttons.render(container)` → JS `Promise`
    #[wasm_bindgen(method, catch)]
    pub fn render(this: &PaypalButtons, container: &Element) -> Result<Promise, JsValue>;

    /// `buttons.close()` → JS `Promise`
    #[wasm_bindgen(method, catch)]
    pub fn close(this: &PaypalButtons) -> Result<Promise, JsValue>;

    /// `buttons.isEligible()`
    #[wasm_bindgen(method, js_name = isEligible)]
    pub fn is_eligible(this: &PaypalButtons) -> bool;

    /// `actions` argument of `createOrder` and `onApprove`
    #[derive(Debug, Clone)]
    pub type OrderActions;

    #[wasm_bindgen(method, getter)]
    pub fn order(this: &OrderActions) -> OrderApi;

    /// `actions.order`
    #[derive(Debug, Clone)]
    pub type OrderApi;

    /// `actions.order.create(request)` → `Promise<orderID>`
    #[wasm_bindgen(method, catch)]
    pub fn create(this: &OrderApi, request: &JsValue) -> Result<Promise, JsValue>;

    /// `actions.order.capture()` → `Promise<details>`
    #[wasm_bindgen(method, catch)]
    pub fn capture(this: &OrderApi) -> Result<Promise, JsValue>;
}

/// Look up the SDK namespace on the global object.
pub fn lookup(global_name: &str) -> Option<PaypalNamespace> {
    let value = Reflect::get(&js_sys::global(), &JsValue::from_str(global_name)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value.unchecked_into())
    }
}

/// Best-effort human-readable text for a thrown JS value
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
