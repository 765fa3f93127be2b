//! Read-only query surface over a built variant catalogue.
//!
//! The repository owns the catalogue produced by one scan and answers every
//! listing and lookup the front end needs. It has no side effects and, since
//! the catalogue is immutable after construction, is safe to query from
//! concurrent readers.

use std::path::{Path, PathBuf};

use crate::models::{TabletConfiguration, TabletVariant, VariantCatalog};
use crate::services::scan::{self, ScanError};

/// Failure to answer a catalogue query. All of these are recoverable: the
/// caller re-queries or reports "not found".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// No such manufacturer in the catalogue.
    #[error("unknown manufacturer: {name}")]
    UnknownManufacturer {
        /// The requested manufacturer name.
        name: String,
    },
    /// The manufacturer exists but has no such device.
    #[error("unknown device \"{name}\" for manufacturer {manufacturer}")]
    UnknownDevice {
        /// The requested manufacturer name.
        manufacturer: String,
        /// The requested device name.
        name: String,
    },
    /// The device exists but has no variant with the given display name.
    #[error("no variant named \"{name}\" for {manufacturer} {device}")]
    UnknownVariant {
        /// The requested manufacturer name.
        manufacturer: String,
        /// The requested device name.
        device: String,
        /// The requested variant display name.
        name: String,
    },
}

/// Query façade over one scanned catalogue.
pub struct VariantRepository {
    catalog: VariantCatalog,
    source_dir: PathBuf,
}

impl VariantRepository {
    /// Scans `source_dir` and wraps the resulting catalogue.
    pub fn open(source_dir: impl Into<PathBuf>) -> Result<Self, ScanError> {
        let source_dir = source_dir.into();
        let catalog = scan::build_catalog(&source_dir)?;
        Ok(Self {
            catalog,
            source_dir,
        })
    }

    /// Wraps an already-built catalogue rooted at `source_dir`.
    pub fn new(catalog: VariantCatalog, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            source_dir: source_dir.into(),
        }
    }

    /// The scanned catalogue itself.
    #[must_use]
    pub fn catalog(&self) -> &VariantCatalog {
        &self.catalog
    }

    /// Root of the source tree this repository was scanned from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Directory a device's variant files live in under the source tree.
    #[must_use]
    pub fn device_source_dir(&self, manufacturer: &str, device: &str) -> PathBuf {
        self.source_dir.join(manufacturer).join(device)
    }

    /// Manufacturer names in discovery order.
    #[must_use]
    pub fn manufacturers(&self) -> Vec<&str> {
        self.catalog
            .manufacturers()
            .iter()
            .map(|manufacturer| manufacturer.name())
            .collect()
    }

    /// Device names of a manufacturer, in discovery order.
    pub fn devices(&self, manufacturer: &str) -> Result<Vec<&str>, QueryError> {
        let entry = self.catalog.find_manufacturer(manufacturer).ok_or_else(|| {
            QueryError::UnknownManufacturer {
                name: manufacturer.to_string(),
            }
        })?;

        Ok(entry.devices().iter().map(|device| device.name()).collect())
    }

    /// Variant display names of a device, stock entry first.
    pub fn variants(&self, manufacturer: &str, device: &str) -> Result<Vec<&str>, QueryError> {
        let entry = self.device_entry(manufacturer, device)?;
        Ok(entry
            .variants()
            .iter()
            .map(|variant| variant.name())
            .collect())
    }

    /// Resolves a variant by exact display name. First match wins, which is
    /// only observable if a file-derived variant shares a name with another
    /// entry; such catalogues are accepted as authored.
    pub fn resolve_variant(
        &self,
        manufacturer: &str,
        device: &str,
        variant_name: &str,
    ) -> Result<&TabletVariant, QueryError> {
        let entry = self.device_entry(manufacturer, device)?;
        entry
            .find_variant(variant_name)
            .ok_or_else(|| QueryError::UnknownVariant {
                manufacturer: manufacturer.to_string(),
                device: device.to_string(),
                name: variant_name.to_string(),
            })
    }

    /// Convenience wrapper over [`resolve_variant`]: the variant's document,
    /// or `Ok(None)` for the stock entry, which deliberately has none.
    ///
    /// [`resolve_variant`]: Self::resolve_variant
    pub fn resolve_configuration(
        &self,
        manufacturer: &str,
        device: &str,
        variant_name: &str,
    ) -> Result<Option<&TabletConfiguration>, QueryError> {
        let variant = self.resolve_variant(manufacturer, device, variant_name)?;
        Ok(variant.configuration())
    }

    fn device_entry(
        &self,
        manufacturer: &str,
        device: &str,
    ) -> Result<&crate::models::DeviceEntry, QueryError> {
        let manufacturer_entry =
            self.catalog.find_manufacturer(manufacturer).ok_or_else(|| {
                QueryError::UnknownManufacturer {
                    name: manufacturer.to_string(),
                }
            })?;

        manufacturer_entry
            .find_device(device)
            .ok_or_else(|| QueryError::UnknownDevice {
                manufacturer: manufacturer.to_string(),
                name: device.to_string(),
            })
    }
}
