//! # Variant Selector
//!
//! Model behind the optional size/edition dropdown. `build_selector` turns a
//! `VariantSet` into what the host draws; `VariantSelection` tracks the live
//! choice and tells subscribers whenever it changes.

use crate::product::{Price, VariantSet};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// One `<option>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: Price,
    pub text: String,
}

/// Label plus options, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorView {
    pub label: String,
    pub options: Vec<SelectOption>,
}

impl SelectorView {
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

pub fn build_selector(variants: &VariantSet) -> SelectorView {
    SelectorView {
        label: format!("Select {}:", variants.label),
        options: variants
            .choices
            .iter()
            .map(|variant| SelectOption {
                value: variant.price.clone(),
                text: variant.option_text(),
            })
            .collect(),
    }
}

type Subscriber = Rc<dyn Fn(&Price)>;

/// The buyer's current choice plus its change listeners
pub struct VariantSelection {
    current: RefCell<Option<Price>>,
    subscribers: RefCell<Vec<Subscriber>>,
}

impl VariantSelection {
    /// Start on the first choice (none if the set is empty)
    pub fn new(variants: &VariantSet) -> Rc<Self> {
        Rc::new(Self {
            current: RefCell::new(variants.first().map(|v| v.price.clone())),
            subscribers: RefCell::new(Vec::new()),
        })
    }

    pub fn current(&self) -> Option<Price> {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&Price) + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(subscriber));
    }

    /// Record a change and notify every subscriber with the price as given.
    pub fn select(&self, price: Price) {
        debug!(price = %price, "Variant selection changed");
        *self.current.borrow_mut() = Some(price.clone());
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber(&price);
        }
    }
}
