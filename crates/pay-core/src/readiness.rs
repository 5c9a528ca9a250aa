//! # SDK Readiness Poll
//!
//! The payment SDK is a `<script>` the host page loads on its own schedule.
//! This module waits for it: one recurring timer checks for the SDK's global
//! and settles the wait as soon as the global appears or the budget runs out.
//!
//! ```text
//!   await_readiness ──► present now? ──yes──► on_done(Ready)
//!                           │ no
//!                           ▼
//!                  set_interval(tick)
//!                           │
//!          ┌────────────────┼─────────────────┐
//!          ▼                ▼                 ▼
//!      present?      elapsed > max?      neither: wait
//!          │                │
//!   clear + Ready    clear + TimedOut
//! ```
//!
//! The timer is cleared on both outcomes and on `PollHandle::cancel`, so
//! nothing keeps ticking once the widget's fate is decided.

use crate::config::SdkSettings;
use crate::error::WidgetResult;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};

/// Timer source for the poll (browser `setInterval`, or a manual clock in tests)
pub trait Scheduler: 'static {
    /// Opaque handle identifying one recurring timer
    type Handle;

    /// Milliseconds on a monotonic-enough clock
    fn now_ms(&self) -> f64;

    /// Start calling `tick` every `period_ms` until cleared.
    fn set_interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> WidgetResult<Self::Handle>;

    /// Stop a timer started with `set_interval`.
    fn clear_interval(&self, handle: Self::Handle);
}

/// How a readiness wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    TimedOut,
}

/// Poll cadence and budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval_ms: u32,
    pub max_wait_ms: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            max_wait_ms: 5000,
        }
    }
}

impl From<&SdkSettings> for PollOptions {
    fn from(settings: &SdkSettings) -> Self {
        Self {
            interval_ms: settings.poll_interval_ms,
            max_wait_ms: settings.max_wait_ms,
        }
    }
}

struct PollState<S: Scheduler> {
    scheduler: Rc<S>,
    timer: RefCell<Option<S::Handle>>,
    settled: Cell<bool>,
    on_done: RefCell<Option<Box<dyn FnOnce(Readiness)>>>,
}

impl<S: Scheduler> PollState<S> {
    fn stop_timer(&self) {
        let timer = self.timer.borrow_mut().take();
        if let Some(handle) = timer {
            self.scheduler.clear_interval(handle);
        }
    }

    fn settle(&self, outcome: Readiness) {
        if self.settled.replace(true) {
            return;
        }
        self.stop_timer();
        let on_done = self.on_done.borrow_mut().take();
        if let Some(on_done) = on_done {
            on_done(outcome);
        }
    }
}

/// Cancellation handle for an in-flight readiness wait
pub struct PollHandle<S: Scheduler> {
    state: Rc<PollState<S>>,
}

impl<S: Scheduler> PollHandle<S> {
    /// Stop waiting. The completion callback will not run.
    pub fn cancel(&self) {
        if self.state.settled.replace(true) {
            return;
        }
        debug!("Readiness poll cancelled");
        self.state.stop_timer();
        self.state.on_done.borrow_mut().take();
    }

    /// True once the wait resolved or was cancelled
    pub fn is_settled(&self) -> bool {
        self.state.settled.get()
    }
}

/// Wait for `is_ready` to report true, checking every `options.interval_ms`.
///
/// Resolves with `Ready` the instant the check passes (synchronously if it
/// already passes now) or `TimedOut` on the first tick whose elapsed time
/// exceeds `options.max_wait_ms`.
pub fn await_readiness<S, F, D>(
    scheduler: Rc<S>,
    options: PollOptions,
    is_ready: F,
    on_done: D,
) -> PollHandle<S>
where
    S: Scheduler,
    F: Fn() -> bool + 'static,
    D: FnOnce(Readiness) + 'static,
{
    let state = Rc::new(PollState {
        scheduler: Rc::clone(&scheduler),
        timer: RefCell::new(None),
        settled: Cell::new(false),
        on_done: RefCell::new(Some(Box::new(on_done))),
    });

    if is_ready() {
        debug!("Payment SDK already present");
        state.settle(Readiness::Ready);
        return PollHandle { state };
    }

    let started_at = scheduler.now_ms();
    let max_wait = f64::from(options.max_wait_ms);
    // The tick keeps the state alive; the cycle is broken when the timer is cleared.
    let tick_state = Rc::clone(&state);
    let tick = Box::new(move || {
        if tick_state.settled.get() {
            return;
        }
        if is_ready() {
            debug!("Payment SDK became available");
            tick_state.settle(Readiness::Ready);
        } else if tick_state.scheduler.now_ms() - started_at > max_wait {
            tick_state.settle(Readiness::TimedOut);
        }
    });

    match scheduler.set_interval(options.interval_ms, tick) {
        Ok(handle) => {
            if state.settled.get() {
                scheduler.clear_interval(handle);
            } else {
                *state.timer.borrow_mut() = Some(handle);
            }
        }
        Err(e) => {
            warn!(error = %e, "Could not start readiness timer");
            state.settle(Readiness::TimedOut);
        }
    }

    PollHandle { state }
}
