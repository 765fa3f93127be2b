//! Tablet configuration document model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single tablet configuration document as consumed by the driver.
///
/// The driver owns the full schema (digitizer specifiers, button bindings,
/// active regions). This crate only interprets the display name and carries
/// every other field opaquely, so a document written back to disk is
/// value-identical to the one that was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabletConfiguration {
    /// Display name of the tablet, e.g. `"Wacom Intuos Pro M"`.
    #[serde(rename = "Name")]
    pub name: String,
    /// All remaining fields of the document, preserved as-is.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl TabletConfiguration {
    /// Creates a configuration with the given display name and no further fields.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest: Map::new(),
        }
    }
}
