//! # Widget Entry
//!
//! Ties the pieces together for one container: optional variant selector,
//! a mount controller for the button region, and the first mount.

use crate::button::{Notifier, PriceResolver};
use crate::config::WidgetSettings;
use crate::error::{WidgetError, WidgetResult};
use crate::mount::{MountController, MountPoint, MountState};
use crate::product::{Price, WidgetConfig};
use crate::readiness::Scheduler;
use crate::sdk::PaymentSdk;
use crate::selector::{build_selector, VariantSelection};
use std::rc::Rc;
use tracing::{info, instrument, warn};

/// Collaborators shared by everything a widget renders
pub struct WidgetEnv<P, S> {
    pub sdk: Rc<P>,
    pub scheduler: Rc<S>,
    pub notifier: Rc<dyn Notifier>,
    pub settings: Rc<WidgetSettings>,
}

impl<P, S> WidgetEnv<P, S> {
    pub fn new(
        sdk: Rc<P>,
        scheduler: Rc<S>,
        notifier: Rc<dyn Notifier>,
        settings: WidgetSettings,
    ) -> Self {
        Self {
            sdk,
            scheduler,
            notifier,
            settings: Rc::new(settings),
        }
    }
}

impl<P, S> Clone for WidgetEnv<P, S> {
    fn clone(&self) -> Self {
        Self {
            sdk: Rc::clone(&self.sdk),
            scheduler: Rc::clone(&self.scheduler),
            notifier: Rc::clone(&self.notifier),
            settings: Rc::clone(&self.settings),
        }
    }
}

/// A mounted widget
pub struct Widget<T, P, S>
where
    T: MountPoint,
    P: PaymentSdk<T>,
    S: Scheduler,
{
    controller: MountController<T, P, S>,
    selection: Option<Rc<VariantSelection>>,
}

impl<T, P, S> Widget<T, P, S>
where
    T: MountPoint,
    P: PaymentSdk<T>,
    S: Scheduler,
{
    pub fn state(&self) -> MountState {
        self.controller.state()
    }

    /// Price an order created right now would carry
    pub fn selected_price(&self) -> Price {
        self.controller.resolve_price()
    }

    /// Live variant selection, if the widget has variants
    pub fn selection(&self) -> Option<&Rc<VariantSelection>> {
        self.selection.as_ref()
    }

    /// The region holding the button
    pub fn button_region(&self) -> &T {
        self.controller.target()
    }

    /// Clear and render again at the current price
    pub fn remount(&self) {
        self.controller.mount(None);
    }
}

/// Mount a widget into `root`.
///
/// With variants, `root` receives the selector and the button goes into the
/// region the selector hands back; every selection change remounts the
/// button at the new price. Without variants the button goes into `root`.
#[instrument(skip_all, fields(description = %config.description, variants = config.has_variants()))]
pub fn mount_widget<T, P, S>(
    root: T,
    config: WidgetConfig,
    env: WidgetEnv<P, S>,
) -> WidgetResult<Widget<T, P, S>>
where
    T: MountPoint,
    P: PaymentSdk<T>,
    S: Scheduler,
{
    config.audit();
    let default_price = config.price.clone();

    let widget = match &config.product_options {
        Some(options) => {
            if options.is_empty() {
                let err = WidgetError::MalformedVariantConfig(format!(
                    "'{}' has no choices",
                    options.label
                ));
                warn!(error = %err, price = %default_price, "Rendering empty selector");
            }

            let view = build_selector(options);
            let selection = VariantSelection::new(options);

            let on_change = Rc::clone(&selection);
            let region = root.attach_selector(&view, Box::new(move |price| on_change.select(price)))?;

            let live = Rc::clone(&selection);
            let resolver: PriceResolver =
                Rc::new(move || live.current().unwrap_or_else(|| default_price.clone()));
            let controller = MountController::new(region, env, config.description.clone(), resolver);

            let remount = controller.clone();
            selection.subscribe(move |price| remount.mount(Some(price.clone())));

            Widget {
                controller,
                selection: Some(selection),
            }
        }
        None => {
            let resolver: PriceResolver = Rc::new(move || default_price.clone());
            Widget {
                controller: MountController::new(root, env, config.description.clone(), resolver),
                selection: None,
            }
        }
    };

    widget.controller.mount(None);
    info!(state = %widget.state(), "Widget mounted");
    Ok(widget)
}
