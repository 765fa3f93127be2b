//! Catalogue containers: the manufacturer → device → variant hierarchy.
//!
//! Entries are stored as vectors rather than maps so that discovery order is
//! preserved exactly and "first match wins" falls out of the linear lookup.
//! The catalogue never mutates after construction; refreshing it means a
//! full re-scan.

use crate::models::TabletVariant;

/// A device and its ordered variant list. The stock entry is always first.
#[derive(Debug, Clone)]
pub struct DeviceEntry {
    name: String,
    variants: Vec<TabletVariant>,
}

impl DeviceEntry {
    /// Creates a device entry from an already-ordered variant list.
    pub fn new(name: impl Into<String>, variants: Vec<TabletVariant>) -> Self {
        Self {
            name: name.into(),
            variants,
        }
    }

    /// Device name, as named by its directory in the source tree.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The device's variants in catalogue order.
    #[must_use]
    pub fn variants(&self) -> &[TabletVariant] {
        &self.variants
    }

    /// First variant with the given display name, if any.
    #[must_use]
    pub fn find_variant(&self, name: &str) -> Option<&TabletVariant> {
        self.variants.iter().find(|variant| variant.name() == name)
    }
}

/// A manufacturer and its devices, in discovery order.
#[derive(Debug, Clone)]
pub struct ManufacturerEntry {
    name: String,
    devices: Vec<DeviceEntry>,
}

impl ManufacturerEntry {
    /// Creates a manufacturer entry from its discovered devices.
    pub fn new(name: impl Into<String>, devices: Vec<DeviceEntry>) -> Self {
        Self {
            name: name.into(),
            devices,
        }
    }

    /// Manufacturer name, as named by its directory in the source tree.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The manufacturer's devices in discovery order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceEntry] {
        &self.devices
    }

    /// Entry for the given device, if present.
    #[must_use]
    pub fn find_device(&self, name: &str) -> Option<&DeviceEntry> {
        self.devices.iter().find(|device| device.name() == name)
    }
}

/// The full immutable hierarchy produced by one catalogue scan.
#[derive(Debug, Clone, Default)]
pub struct VariantCatalog {
    manufacturers: Vec<ManufacturerEntry>,
}

impl VariantCatalog {
    /// Creates a catalogue from its discovered manufacturers.
    #[must_use]
    pub fn new(manufacturers: Vec<ManufacturerEntry>) -> Self {
        Self { manufacturers }
    }

    /// The manufacturers in discovery order.
    #[must_use]
    pub fn manufacturers(&self) -> &[ManufacturerEntry] {
        &self.manufacturers
    }

    /// Entry for the given manufacturer, if present.
    #[must_use]
    pub fn find_manufacturer(&self, name: &str) -> Option<&ManufacturerEntry> {
        self.manufacturers
            .iter()
            .find(|manufacturer| manufacturer.name() == name)
    }

    /// Whether the scan found no manufacturers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.manufacturers.is_empty()
    }
}
