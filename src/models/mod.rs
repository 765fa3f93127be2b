//! Data models for the variant catalogue.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of UI and filesystem logic.

pub mod catalog;
pub mod configuration;
pub mod variant;

// Re-export all model types
pub use catalog::{DeviceEntry, ManufacturerEntry, VariantCatalog};
pub use configuration::TabletConfiguration;
pub use variant::{TabletVariant, VariantPayload};
