//! Fake collaborators for unit tests: a manual clock, a scriptable SDK, a
//! mount point that records what was drawn, and a notifier that records
//! alerts and navigations.

use crate::button::{Notifier, PaymentButton};
use crate::config::WidgetSettings;
use crate::error::{WidgetError, WidgetResult};
use crate::fallback::UnavailableNotice;
use crate::mount::MountPoint;
use crate::product::Price;
use crate::readiness::Scheduler;
use crate::sdk::PaymentSdk;
use crate::selector::SelectorView;
use crate::widget::WidgetEnv;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

struct ManualTimer {
    period: f64,
    next_due: f64,
    tick: Option<Box<dyn FnMut()>>,
}

/// Scheduler driven by `advance` instead of wall time
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<f64>,
    next_id: Cell<u32>,
    timers: RefCell<BTreeMap<u32, ManualTimer>>,
    fail_next: Cell<bool>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn fail_next_interval(&self) {
        self.fail_next.set(true);
    }

    /// Move the clock forward, firing every tick that falls due on the way.
    pub fn advance(&self, ms: u32) {
        let target = self.now.get() + f64::from(ms);
        loop {
            let next = self
                .timers
                .borrow()
                .iter()
                .filter(|(_, t)| t.tick.is_some() && t.next_due <= target)
                .map(|(id, t)| (t.next_due, *id))
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            let Some((due, id)) = next else { break };

            self.now.set(due);
            let tick = {
                let mut timers = self.timers.borrow_mut();
                let timer = timers.get_mut(&id).expect("timer vanished");
                timer.next_due += timer.period;
                timer.tick.take()
            };
            if let Some(mut tick) = tick {
                tick();
                if let Some(timer) = self.timers.borrow_mut().get_mut(&id) {
                    timer.tick = Some(tick);
                }
            }
        }
        self.now.set(target);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u32;

    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn set_interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> WidgetResult<u32> {
        if self.fail_next.replace(false) {
            return Err(WidgetError::Dom("setInterval refused".into()));
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let period = f64::from(period_ms);
        self.timers.borrow_mut().insert(
            id,
            ManualTimer {
                period,
                next_due: self.now.get() + period,
                tick: Some(tick),
            },
        );
        Ok(id)
    }

    fn clear_interval(&self, handle: u32) {
        self.timers.borrow_mut().remove(&handle);
    }
}

/// What a recording mount point currently shows
#[derive(Clone)]
pub enum Content {
    Button(Rc<PaymentButton>),
    Notice(UnavailableNotice),
    Selector(SelectorView, RecordingMountPoint),
}

/// Mount point that keeps its children in memory
#[derive(Clone, Default)]
pub struct RecordingMountPoint {
    children: Rc<RefCell<Vec<Content>>>,
    on_change: Rc<RefCell<Option<Rc<dyn Fn(Price)>>>>,
}

impl RecordingMountPoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<Content> {
        self.children.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn push_button(&self, button: Rc<PaymentButton>) {
        self.children.borrow_mut().push(Content::Button(button));
    }

    pub fn buttons(&self) -> Vec<Rc<PaymentButton>> {
        self.children
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Content::Button(b) => Some(Rc::clone(b)),
                _ => None,
            })
            .collect()
    }

    pub fn button_count(&self) -> usize {
        self.buttons().len()
    }

    pub fn notice(&self) -> Option<UnavailableNotice> {
        self.children.borrow().iter().find_map(|c| match c {
            Content::Notice(n) => Some(n.clone()),
            _ => None,
        })
    }

    pub fn selector_view(&self) -> Option<SelectorView> {
        self.children.borrow().iter().find_map(|c| match c {
            Content::Selector(view, _) => Some(view.clone()),
            _ => None,
        })
    }

    /// Simulate the buyer picking the option whose value is `value`
    pub fn choose(&self, value: &str) {
        let on_change = self.on_change.borrow().clone();
        if let Some(on_change) = on_change {
            on_change(Price::new(value));
        }
    }
}

impl MountPoint for RecordingMountPoint {
    fn clear(&self) {
        self.children.borrow_mut().clear();
    }

    fn show_notice(&self, notice: &UnavailableNotice) {
        let mut children = self.children.borrow_mut();
        children.clear();
        children.push(Content::Notice(notice.clone()));
    }

    fn attach_selector(
        &self,
        view: &SelectorView,
        on_change: Box<dyn Fn(Price)>,
    ) -> WidgetResult<Self> {
        let region = RecordingMountPoint::new();
        {
            let mut children = self.children.borrow_mut();
            children.clear();
            children.push(Content::Selector(view.clone(), region.clone()));
        }
        *self.on_change.borrow_mut() = Some(Rc::from(on_change));
        Ok(region)
    }
}

/// SDK whose presence and render behaviour are set by the test
#[derive(Default)]
pub struct ScriptedSdk {
    ready: Cell<bool>,
    fail_render: Cell<bool>,
    renders: Cell<usize>,
    releases: Cell<usize>,
}

impl ScriptedSdk {
    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    pub fn fail_renders(&self, fail: bool) {
        self.fail_render.set(fail);
    }

    pub fn renders(&self) -> usize {
        self.renders.get()
    }

    pub fn releases(&self) -> usize {
        self.releases.get()
    }
}

impl PaymentSdk<RecordingMountPoint> for ScriptedSdk {
    fn provider_name(&self) -> &'static str {
        "PayPal"
    }

    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn render_button(
        &self,
        target: &RecordingMountPoint,
        button: Rc<PaymentButton>,
    ) -> WidgetResult<()> {
        if self.fail_render.get() {
            return Err(WidgetError::Provider {
                provider: "PayPal".into(),
                message: "render rejected".into(),
            });
        }
        self.renders.set(self.renders.get() + 1);
        target.push_button(button);
        Ok(())
    }

    fn release(&self, _target: &RecordingMountPoint) {
        self.releases.set(self.releases.get() + 1);
    }
}

/// Notifier that records instead of alerting or navigating
#[derive(Default)]
pub struct RecordingNotifier {
    alerts: RefCell<Vec<String>>,
    navigations: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_string());
    }
}

/// Environment plus direct handles on each fake
pub struct TestHarness {
    pub env: WidgetEnv<ScriptedSdk, ManualScheduler>,
    pub sdk: Rc<ScriptedSdk>,
    pub scheduler: Rc<ManualScheduler>,
    pub notifier: Rc<RecordingNotifier>,
}

pub fn test_env(settings: WidgetSettings) -> TestHarness {
    let sdk = Rc::new(ScriptedSdk::default());
    let scheduler = Rc::new(ManualScheduler::new());
    let notifier = Rc::new(RecordingNotifier::default());
    let env = WidgetEnv::new(
        Rc::clone(&sdk),
        Rc::clone(&scheduler),
        Rc::clone(&notifier) as Rc<dyn Notifier>,
        settings,
    );
    TestHarness {
        env,
        sdk,
        scheduler,
        notifier,
    }
}
