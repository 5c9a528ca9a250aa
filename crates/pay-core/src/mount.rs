//! # Button Mount Controller
//!
//! Owns the region that holds the live payment button. Every `mount` clears
//! the region, waits for the SDK and then renders either a button or the
//! fallback notice:
//!
//! ```text
//!   Empty ──mount──► Pending ──Ready────► Rendered(price)
//!                       │
//!                       └────TimedOut──► Unavailable
//!
//!   any state ──mount──► Pending   (previous button and poll dropped first)
//! ```

use crate::button::{PaymentButton, PriceResolver};
use crate::error::WidgetResult;
use crate::fallback::{render_unavailable, UnavailableNotice};
use crate::product::Price;
use crate::readiness::{await_readiness, PollHandle, PollOptions, Readiness, Scheduler};
use crate::sdk::PaymentSdk;
use crate::selector::SelectorView;
use crate::widget::WidgetEnv;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, error, info, instrument};

/// A DOM region the widget may write into
pub trait MountPoint: Clone + 'static {
    /// Remove every child
    fn clear(&self);

    /// Replace the contents with an inert notice
    fn show_notice(&self, notice: &UnavailableNotice);

    /// Replace the contents with a labeled dropdown followed by an empty
    /// region for the button, and return that region. `on_change` receives
    /// the chosen option's value on every change.
    fn attach_selector(&self, view: &SelectorView, on_change: Box<dyn Fn(Price)>)
        -> WidgetResult<Self>;
}

/// Lifecycle of the button region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MountState {
    #[default]
    Empty,
    Pending,
    Rendered(Price),
    Unavailable,
}

impl MountState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MountState::Empty => "empty",
            MountState::Pending => "pending",
            MountState::Rendered(_) => "rendered",
            MountState::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for MountState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MountState::Rendered(price) => write!(f, "rendered({})", price),
            other => f.write_str(other.as_str()),
        }
    }
}

struct Inner<T, P, S>
where
    T: MountPoint,
    P: PaymentSdk<T>,
    S: Scheduler,
{
    target: T,
    env: WidgetEnv<P, S>,
    description: String,
    resolver: PriceResolver,
    state: RefCell<MountState>,
    poll: RefCell<Option<PollHandle<S>>>,
    generation: Cell<u64>,
}

/// Single writer of one button region
pub struct MountController<T, P, S>
where
    T: MountPoint,
    P: PaymentSdk<T>,
    S: Scheduler,
{
    inner: Rc<Inner<T, P, S>>,
}

impl<T, P, S> Clone for MountController<T, P, S>
where
    T: MountPoint,
    P: PaymentSdk<T>,
    S: Scheduler,
{
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, P, S> MountController<T, P, S>
where
    T: MountPoint,
    P: PaymentSdk<T>,
    S: Scheduler,
{
    pub fn new(
        target: T,
        env: WidgetEnv<P, S>,
        description: impl Into<String>,
        resolver: PriceResolver,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                target,
                env,
                description: description.into(),
                resolver,
                state: RefCell::new(MountState::Empty),
                poll: RefCell::new(None),
                generation: Cell::new(0),
            }),
        }
    }

    pub fn state(&self) -> MountState {
        self.inner.state.borrow().clone()
    }

    pub fn target(&self) -> &T {
        &self.inner.target
    }

    /// Price the next order would use
    pub fn resolve_price(&self) -> Price {
        (self.inner.resolver)()
    }

    /// Clear the region and render a button bound to `price_override`, or to
    /// whatever the resolver returns now.
    #[instrument(skip(self), fields(provider = self.inner.env.sdk.provider_name()))]
    pub fn mount(&self, price_override: Option<Price>) {
        let inner = &self.inner;
        let price = price_override.unwrap_or_else(|| (inner.resolver)());

        let previous = inner.poll.borrow_mut().take();
        if let Some(previous) = previous {
            previous.cancel();
        }
        inner.env.sdk.release(&inner.target);
        inner.target.clear();

        let generation = inner.generation.get() + 1;
        inner.generation.set(generation);
        *inner.state.borrow_mut() = MountState::Pending;
        debug!(price = %price, generation, "Mounting payment button");

        let sdk = Rc::clone(&inner.env.sdk);
        let this = Rc::clone(inner);
        let handle = await_readiness(
            Rc::clone(&inner.env.scheduler),
            PollOptions::from(&inner.env.settings.sdk),
            move || sdk.is_ready(),
            move |readiness| this.settle(generation, price, readiness),
        );
        if !handle.is_settled() {
            *inner.poll.borrow_mut() = Some(handle);
        }
    }
}

impl<T, P, S> Inner<T, P, S>
where
    T: MountPoint,
    P: PaymentSdk<T>,
    S: Scheduler,
{
    fn settle(&self, generation: u64, price: Price, readiness: Readiness) {
        if self.generation.get() != generation {
            debug!(generation, "Ignoring stale readiness result");
            return;
        }
        self.poll.borrow_mut().take();

        match readiness {
            Readiness::Ready => self.render(price),
            Readiness::TimedOut => {
                error!(
                    provider = self.env.sdk.provider_name(),
                    waited_ms = self.env.settings.sdk.max_wait_ms,
                    "Payment SDK failed to load"
                );
                self.fall_back();
            }
        }
    }

    fn render(&self, price: Price) {
        let button = Rc::new(PaymentButton::new(
            self.env.sdk.provider_name(),
            self.description.clone(),
            Rc::clone(&self.resolver),
            &self.env.settings,
            Rc::clone(&self.env.notifier),
        ));

        match self.env.sdk.render_button(&self.target, button) {
            Ok(()) => {
                info!(price = %price, "Payment button rendered");
                *self.state.borrow_mut() = MountState::Rendered(price);
            }
            Err(e) => {
                error!(error = %e, "Payment button failed to render");
                self.fall_back();
            }
        }
    }

    fn fall_back(&self) {
        render_unavailable(
            &self.target,
            self.env.sdk.provider_name(),
            &self.env.settings.contact,
        );
        *self.state.borrow_mut() = MountState::Unavailable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetSettings;
    use crate::testing::{test_env, ManualScheduler, RecordingMountPoint, ScriptedSdk, TestHarness};

    type TestController = MountController<RecordingMountPoint, ScriptedSdk, ManualScheduler>;

    fn controller(settings: WidgetSettings, price: &str) -> (TestController, TestHarness) {
        let harness = test_env(settings);
        let fixed = Price::new(price);
        let controller = MountController::new(
            RecordingMountPoint::new(),
            harness.env.clone(),
            "Widget",
            Rc::new(move || fixed.clone()),
        );
        (controller, harness)
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(MountState::Empty.as_str(), "empty");
        assert_eq!(
            MountState::Rendered(Price::new("5.00")).to_string(),
            "rendered(5.00)"
        );
    }

    #[test]
    fn test_ready_sdk_renders_immediately() {
        let (controller, harness) = controller(WidgetSettings::default(), "25.00");
        harness.sdk.set_ready(true);

        assert_eq!(controller.state(), MountState::Empty);
        controller.mount(None);

        assert_eq!(controller.state(), MountState::Rendered(Price::new("25.00")));
        assert_eq!(controller.target().button_count(), 1);
        assert_eq!(harness.scheduler.active_timers(), 0);
    }

    #[test]
    fn test_pending_until_sdk_appears() {
        let (controller, harness) = controller(WidgetSettings::default(), "25.00");

        controller.mount(None);
        assert_eq!(controller.state(), MountState::Pending);
        assert_eq!(controller.target().len(), 0);

        harness.sdk.set_ready(true);
        harness.scheduler.advance(100);
        assert_eq!(controller.state(), MountState::Rendered(Price::new("25.00")));
    }

    #[test]
    fn test_remount_while_pending_cancels_previous_poll() {
        let (controller, harness) = controller(WidgetSettings::default(), "25.00");

        controller.mount(None);
        controller.mount(Some(Price::new("30.00")));
        assert_eq!(harness.scheduler.active_timers(), 1);

        harness.sdk.set_ready(true);
        harness.scheduler.advance(100);

        assert_eq!(controller.target().button_count(), 1);
        assert_eq!(controller.state(), MountState::Rendered(Price::new("30.00")));
    }

    #[test]
    fn test_render_error_falls_back() {
        let (controller, harness) = controller(WidgetSettings::default(), "25.00");
        harness.sdk.set_ready(true);
        harness.sdk.fail_renders(true);

        controller.mount(None);

        assert_eq!(controller.state(), MountState::Unavailable);
        assert!(controller.target().notice().is_some());

        // a later mount recovers cleanly
        harness.sdk.fail_renders(false);
        controller.mount(None);
        assert_eq!(controller.state(), MountState::Rendered(Price::new("25.00")));
        assert!(controller.target().notice().is_none());
    }

    #[test]
    fn test_remount_releases_previous_button() {
        let (controller, harness) = controller(WidgetSettings::default(), "25.00");
        harness.sdk.set_ready(true);

        controller.mount(None);
        controller.mount(None);

        assert_eq!(harness.sdk.releases(), 2);
        assert_eq!(harness.sdk.renders(), 2);
        assert_eq!(controller.target().button_count(), 1);
    }
}
