//! `Scheduler` on top of `window.setInterval`.

use crate::dom::dom_error;
use pay_core::{Scheduler, WidgetError, WidgetResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// A running `setInterval` and the closure it calls
pub struct BrowserInterval {
    id: i32,
    _tick: Closure<dyn FnMut()>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl BrowserScheduler {
    fn window() -> WidgetResult<Window> {
        web_sys::window().ok_or_else(|| WidgetError::Dom("no window".into()))
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserInterval;

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn set_interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> WidgetResult<BrowserInterval> {
        let tick = Closure::wrap(tick);
        let timeout = i32::try_from(period_ms)
            .map_err(|_| WidgetError::Configuration(format!("interval {} ms too large", period_ms)))?;
        let id = Self::window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(dom_error)?;
        Ok(BrowserInterval { id, _tick: tick })
    }

    fn clear_interval(&self, handle: BrowserInterval) {
        if let Ok(window) = Self::window() {
            window.clear_interval_with_handle(handle.id);
        }
    }
}
