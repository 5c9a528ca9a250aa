//! DOM-backed `MountPoint`.

use pay_core::{MountPoint, Price, SelectorView, UnavailableNotice, WidgetError, WidgetResult};
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlSelectElement};

const FALLBACK_ID: &str = "pay-widget";

/// A container element on the host page
#[derive(Clone)]
pub struct DomMountPoint {
    element: Element,
    _listener: Option<Rc<Closure<dyn FnMut(Event)>>>,
}

impl DomMountPoint {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            _listener: None,
        }
    }

    /// Resolve `selector` against the current document.
    pub fn resolve(selector: &str) -> WidgetResult<Self> {
        let not_found = || WidgetError::ContainerNotFound {
            selector: selector.to_string(),
        };
        let element = document()?
            .query_selector(selector)
            .map_err(|_| not_found())?
            .ok_or_else(not_found)?;
        Ok(Self::new(element))
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    fn id_base(&self) -> String {
        let id = self.element.id();
        if id.is_empty() {
            FALLBACK_ID.to_string()
        } else {
            id
        }
    }

    fn create(&self, tag: &str) -> WidgetResult<Element> {
        document()?.create_element(tag).map_err(dom_error)
    }

    fn append(parent: &Element, child: &Element) -> WidgetResult<()> {
        parent.append_child(child).map(|_| ()).map_err(dom_error)
    }

    fn build_notice(&self, notice: &UnavailableNotice) -> WidgetResult<Element> {
        let wrapper = self.create("div")?;
        wrapper.set_class_name("pay-widget-unavailable");

        let title = self.create("p")?;
        title.set_class_name("pay-widget-unavailable-title");
        title.set_text_content(Some(&notice.title));

        let body = self.create("p")?;
        body.set_text_content(Some(&notice.lead));
        let link = self.create("a")?;
        link.set_attribute("href", &notice.mailto()).map_err(dom_error)?;
        link.set_text_content(Some(&notice.support_email));

        Self::append(&body, &link)?;
        Self::append(&wrapper, &title)?;
        Self::append(&wrapper, &body)?;
        Ok(wrapper)
    }
}

impl AsRef<Element> for DomMountPoint {
    fn as_ref(&self) -> &Element {
        &self.element
    }
}

impl MountPoint for DomMountPoint {
    fn clear(&self) {
        while let Some(child) = self.element.first_child() {
            if self.element.remove_child(&child).is_err() {
                break;
            }
        }
    }

    fn show_notice(&self, notice: &UnavailableNotice) {
        self.clear();
        match self.build_notice(notice) {
            Ok(node) => {
                if let Err(err) = Self::append(&self.element, &node) {
                    debug!(error = %err, "Notice markup rejected, using text");
                    self.element.set_text_content(Some(&notice.text()));
                }
            }
            Err(err) => {
                debug!(error = %err, "Notice markup rejected, using text");
                self.element.set_text_content(Some(&notice.text()));
            }
        }
    }

    fn attach_selector(
        &self,
        view: &SelectorView,
        on_change: Box<dyn Fn(Price)>,
    ) -> WidgetResult<Self> {
        let base = self.id_base();
        let select_id = format!("{}-option", base);

        self.clear();

        let group = self.create("div")?;
        group.set_class_name("pay-widget-options");

        let label = self.create("label")?;
        label.set_attribute("for", &select_id).map_err(dom_error)?;
        label.set_text_content(Some(&view.label));

        let select: HtmlSelectElement = self
            .create("select")?
            .dyn_into()
            .map_err(|_| WidgetError::Dom("<select> is not an HtmlSelectElement".into()))?;
        select.set_id(&select_id);
        for option in &view.options {
            let node = self.create("option")?;
            node.set_attribute("value", option.value.as_str())
                .map_err(dom_error)?;
            node.set_text_content(Some(&option.text));
            Self::append(&select, &node)?;
        }

        let region = self.create("div")?;
        region.set_id(&format!("{}-button", base));

        Self::append(&group, &label)?;
        Self::append(&group, &select)?;
        Self::append(&self.element, &group)?;
        Self::append(&self.element, &region)?;

        let source = select.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            on_change(Price::new(source.value()));
        });
        select
            .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
            .map_err(dom_error)?;

        Ok(Self {
            element: region,
            _listener: Some(Rc::new(listener)),
        })
    }
}

fn document() -> WidgetResult<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| WidgetError::Dom("no document".into()))
}

pub(crate) fn dom_error(err: JsValue) -> WidgetError {
    WidgetError::Dom(pay_paypal::bindings::describe_js_error(&err))
}
