//! # PayPal Buttons
//!
//! `PaymentSdk` implementation backed by `paypal.Buttons`. Each render builds
//! the SDK's options object from a `PaymentButton`:
//!
//! | SDK slot      | Delegates to                                  |
//! |---------------|-----------------------------------------------|
//! | `createOrder` | `PaymentButton::create_order` → `order.create` |
//! | `onApprove`   | `order.capture()` then `PaymentButton::approve` |
//! | `onCancel`    | `PaymentButton::cancelled`                    |
//! | `onError`     | `PaymentButton::fail`                         |
//!
//! The closures backing those slots live as long as the rendered instance;
//! `release` closes the instance and drops them once the close settles.

use crate::bindings::{self, describe_js_error, OrderActions, PaypalButtons};
use crate::wire::{ApproveData, CancelData, CaptureResponse, OrderRequest};
use js_sys::{Object, Promise, Reflect};
use pay_core::{
    Approval, CapturedPayment, MountPoint, PaymentButton, PaymentSdk, SdkSettings, WidgetError,
    WidgetResult,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, instrument, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::Element;

/// Provider name shown to buyers and in logs
pub const PROVIDER: &str = "PayPal";

type OrderCallback = Closure<dyn FnMut(JsValue, OrderActions) -> Result<Promise, JsValue>>;
type ApproveCallback = Closure<dyn FnMut(JsValue, OrderActions) -> Promise>;
type DataCallback = Closure<dyn FnMut(JsValue)>;

struct ButtonCallbacks {
    create_order: OrderCallback,
    on_approve: ApproveCallback,
    on_cancel: DataCallback,
    on_error: DataCallback,
}

struct RenderedButton {
    container: Element,
    instance: PaypalButtons,
    _callbacks: ButtonCallbacks,
}

/// PayPal JS SDK as a `PaymentSdk`
pub struct PaypalSdk {
    global_name: String,
    rendered: RefCell<Vec<RenderedButton>>,
}

impl PaypalSdk {
    pub fn new(global_name: impl Into<String>) -> Self {
        Self {
            global_name: global_name.into(),
            rendered: RefCell::new(Vec::new()),
        }
    }

    pub fn from_settings(settings: &SdkSettings) -> Self {
        Self::new(settings.global_name.clone())
    }

    fn provider_error(err: &JsValue) -> WidgetError {
        WidgetError::Provider {
            provider: PROVIDER.to_string(),
            message: describe_js_error(err),
        }
    }

    fn build_callbacks(button: &Rc<PaymentButton>) -> ButtonCallbacks {
        let b = Rc::clone(button);
        let create_order: OrderCallback = Closure::new(
            move |_data: JsValue, actions: OrderActions| -> Result<Promise, JsValue> {
                let intent = b.create_order();
                let request = serde_wasm_bindgen::to_value(&OrderRequest::from(&intent))
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
                let created = actions.order().create(&request)?;
                let attempt_id = intent.attempt_id;
                Ok(future_to_promise(async move {
                    JsFuture::from(created).await.map_err(|e| {
                        let err = WidgetError::OrderCreationFailed(describe_js_error(&e));
                        warn!(attempt_id = %attempt_id, error = %err, "Order rejected by provider");
                        e
                    })
                }))
            },
        );

        let b = Rc::clone(button);
        let on_approve: ApproveCallback = Closure::new(
            move |data: JsValue, actions: OrderActions| -> Promise {
                let button = Rc::clone(&b);
                let approval: Approval = match serde_wasm_bindgen::from_value::<ApproveData>(data) {
                    Ok(data) => data.into(),
                    Err(e) => {
                        button.fail(WidgetError::Serialization(e.to_string()));
                        return Promise::resolve(&JsValue::UNDEFINED);
                    }
                };
                let capture = actions.order().capture();
                future_to_promise(async move {
                    let captured = match capture {
                        Ok(promise) => capture_result(JsFuture::from(promise).await),
                        Err(e) => Err(WidgetError::CaptureFailed(describe_js_error(&e))),
                    };
                    // Failures are reported here; resolving keeps the SDK from
                    // raising a second error for the same attempt.
                    button.approve(&approval, captured);
                    Ok(JsValue::UNDEFINED)
                })
            },
        );

        let b = Rc::clone(button);
        let on_cancel: DataCallback = Closure::new(move |data: JsValue| {
            let data: CancelData = serde_wasm_bindgen::from_value(data).unwrap_or_default();
            b.cancelled(data.order_id.as_deref());
        });

        let b = Rc::clone(button);
        let on_error: DataCallback = Closure::new(move |err: JsValue| {
            b.fail(Self::provider_error(&err));
        });

        ButtonCallbacks {
            create_order,
            on_approve,
            on_cancel,
            on_error,
        }
    }

    fn build_options(button: &PaymentButton, callbacks: &ButtonCallbacks) -> WidgetResult<Object> {
        let options = Object::new();
        let style = serde_wasm_bindgen::to_value(button.style())
            .map_err(|e| WidgetError::Serialization(e.to_string()))?;
        set(&options, "style", &style)?;
        set(&options, "createOrder", callbacks.create_order.as_ref())?;
        set(&options, "onApprove", callbacks.on_approve.as_ref())?;
        set(&options, "onCancel", callbacks.on_cancel.as_ref())?;
        set(&options, "onError", callbacks.on_error.as_ref())?;
        Ok(options)
    }

    fn take_rendered(&self, container: &Element) -> Vec<RenderedButton> {
        let mut rendered = self.rendered.borrow_mut();
        let (released, kept): (Vec<_>, Vec<_>) = rendered
            .drain(..)
            .partition(|r| &r.container == container);
        *rendered = kept;
        released
    }
}

impl Default for PaypalSdk {
    fn default() -> Self {
        Self::from_settings(&SdkSettings::default())
    }
}

impl<T> PaymentSdk<T> for PaypalSdk
where
    T: MountPoint + AsRef<Element>,
{
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn is_ready(&self) -> bool {
        bindings::lookup(&self.global_name).is_some()
    }

    #[instrument(skip_all, fields(global = %self.global_name))]
    fn render_button(&self, target: &T, button: Rc<PaymentButton>) -> WidgetResult<()> {
        let namespace = bindings::lookup(&self.global_name).ok_or(WidgetError::SdkUnavailable {
            waited_ms: 0,
        })?;

        let callbacks = Self::build_callbacks(&button);
        let options = Self::build_options(&button, &callbacks)?;
        let instance = namespace
            .buttons(&options)
            .map_err(|e| Self::provider_error(&e))?;

        if !instance.is_eligible() {
            return Err(WidgetError::Provider {
                provider: PROVIDER.to_string(),
                message: "button is not eligible on this page".to_string(),
            });
        }

        let container = target.as_ref().clone();
        let rendering = instance
            .render(&container)
            .map_err(|e| Self::provider_error(&e))?;
        spawn_local(async move {
            if let Err(e) = JsFuture::from(rendering).await {
                warn!(error = %describe_js_error(&e), "PayPal button render did not complete");
            }
        });

        debug!(description = %button.description(), "PayPal button dispatched");
        self.rendered.borrow_mut().push(RenderedButton {
            container,
            instance,
            _callbacks: callbacks,
        });
        Ok(())
    }

    fn release(&self, target: &T) {
        for previous in self.take_rendered(target.as_ref()) {
            match previous.instance.close() {
                Ok(closing) => spawn_local(async move {
                    let _ = JsFuture::from(closing).await;
                    drop(previous);
                }),
                Err(e) => {
                    debug!(error = %describe_js_error(&e), "PayPal button already gone");
                }
            }
        }
    }
}

fn capture_result(settled: Result<JsValue, JsValue>) -> WidgetResult<CapturedPayment> {
    let details = settled.map_err(|e| WidgetError::CaptureFailed(describe_js_error(&e)))?;
    let response: CaptureResponse = serde_wasm_bindgen::from_value(details)
        .map_err(|e| WidgetError::CaptureFailed(e.to_string()))?;
    Ok(response.into())
}

fn set(target: &Object, key: &str, value: &JsValue) -> WidgetResult<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| WidgetError::Serialization(describe_js_error(&e)))
}
