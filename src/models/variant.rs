//! Variant model: one selectable configuration for a device.

use crate::constants::STOCK_SUFFIX;
use crate::models::TabletConfiguration;

/// Payload of a variant.
///
/// The stock case carries no document on purpose: installing stock means
/// "remove the override", not "install an empty document".
#[derive(Debug, Clone, PartialEq)]
pub enum VariantPayload {
    /// No override; the driver falls back to its built-in configuration.
    Stock,
    /// A configuration document that replaces the driver's built-in one.
    Override(TabletConfiguration),
}

/// A named, selectable configuration for a device.
///
/// Variants are created once during catalogue build and are immutable
/// thereafter; the device's variant list owns them exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct TabletVariant {
    name: String,
    payload: VariantPayload,
}

impl TabletVariant {
    /// Creates the synthetic stock variant for `device`, named `"<device> Stock"`.
    #[must_use]
    pub fn stock(device: &str) -> Self {
        Self {
            name: format!("{device} {STOCK_SUFFIX}"),
            payload: VariantPayload::Stock,
        }
    }

    /// Creates an override variant carrying a parsed configuration document.
    pub fn override_of(name: impl Into<String>, configuration: TabletConfiguration) -> Self {
        Self {
            name: name.into(),
            payload: VariantPayload::Override(configuration),
        }
    }

    /// Display name, unique within the device's variant list.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the synthetic stock entry.
    #[must_use]
    pub fn is_stock(&self) -> bool {
        matches!(self.payload, VariantPayload::Stock)
    }

    /// The attached configuration document; `None` for the stock entry.
    #[must_use]
    pub fn configuration(&self) -> Option<&TabletConfiguration> {
        match &self.payload {
            VariantPayload::Stock => None,
            VariantPayload::Override(configuration) => Some(configuration),
        }
    }
}
