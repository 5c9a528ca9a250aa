//! # Product Types
//!
//! What the buyer is paying for: a description, a default price and an
//! optional set of priced variants. Built once from the caller's options and
//! never mutated afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Price used when the caller supplies none
pub const DEFAULT_PRICE: &str = "100.00";

/// Description used when the caller supplies none
pub const DEFAULT_DESCRIPTION: &str = "Product";

/// Selector label used when a variant set arrives without one
pub const DEFAULT_OPTION_LABEL: &str = "Option";

/// A decimal price string, kept exactly as the caller wrote it.
///
/// The widget never parses, rounds or reformats prices; the provider is the
/// authority on what is a valid amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check for a non-negative decimal with exactly two fraction digits
    /// (e.g. "25.00"). Used for diagnostics only.
    pub fn is_well_formed(&self) -> bool {
        match self.0.split_once('.') {
            Some((whole, fraction)) => {
                !whole.is_empty()
                    && whole.chars().all(|c| c.is_ascii_digit())
                    && fraction.len() == 2
                    && fraction.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        }
    }

    /// Format for display (e.g., "$10.00")
    pub fn display(&self) -> String {
        format!("${}", self.0)
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::new(DEFAULT_PRICE)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Price::new(value)
    }
}

/// One selectable priced option (e.g. "Large" at "15.00")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub price: Price,
}

impl Variant {
    pub fn new(name: impl Into<String>, price: impl Into<Price>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    /// Dropdown text, e.g. "Large - $15.00"
    pub fn option_text(&self) -> String {
        format!("{} - {}", self.name, self.price.display())
    }
}

/// Labeled, display-ordered list of variants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSet {
    #[serde(default = "default_option_label", deserialize_with = "label_or_default")]
    pub label: String,
    #[serde(default, deserialize_with = "choices_or_empty")]
    pub choices: Vec<Variant>,
}

fn default_option_label() -> String {
    DEFAULT_OPTION_LABEL.to_string()
}

fn label_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).unwrap_or_else(default_option_label))
}

// A `null` choice list degrades to an empty selector instead of failing the mount.
fn choices_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Variant>, D::Error> {
    Ok(Option::<Vec<Variant>>::deserialize(deserializer)?.unwrap_or_default())
}

impl VariantSet {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            choices: Vec::new(),
        }
    }

    /// Builder: append a choice
    pub fn with_choice(mut self, name: impl Into<String>, price: impl Into<Price>) -> Self {
        self.choices.push(Variant::new(name, price));
        self
    }

    /// The default selection
    pub fn first(&self) -> Option<&Variant> {
        self.choices.first()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// Caller-supplied widget options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default, deserialize_with = "price_or_default")]
    pub price: Price,

    #[serde(default = "default_description", deserialize_with = "description_or_default")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_options: Option<VariantSet>,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

// Host pages pass `null` or "" for "not set"; both fall back to the default.
fn price_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Price, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(Price::new).unwrap_or_default())
}

fn description_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).unwrap_or_else(default_description))
}

impl WidgetConfig {
    /// Create a fixed-price config
    pub fn new(price: impl Into<Price>, description: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            description: description.into(),
            product_options: None,
        }
    }

    /// Builder: attach variants
    pub fn with_options(mut self, options: VariantSet) -> Self {
        self.product_options = Some(options);
        self
    }

    /// Parse from a JSON value (the shape a host page passes in)
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn has_variants(&self) -> bool {
        self.product_options.is_some()
    }

    /// Price bound to the first render: the first variant if any, else the default
    pub fn initial_price(&self) -> Price {
        self.product_options
            .as_ref()
            .and_then(VariantSet::first)
            .map(|v| v.price.clone())
            .unwrap_or_else(|| self.price.clone())
    }

    /// Log anything odd about the config. Nothing here rejects it.
    pub fn audit(&self) {
        if !self.price.is_well_formed() {
            warn!(price = %self.price, "Default price is not a two-decimal amount");
        }
        if let Some(options) = &self.product_options {
            if options.is_empty() {
                warn!(label = %options.label, "Variant set has no choices");
            }
            for variant in options.choices.iter().filter(|v| !v.price.is_well_formed()) {
                warn!(variant = %variant.name, price = %variant.price, "Variant price is not a two-decimal amount");
            }
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE, DEFAULT_DESCRIPTION)
    }
}
