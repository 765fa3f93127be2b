//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the on-disk layout conventions
//! shared with the driver process.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Tablet Variant Manager";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "tablet-variant-manager";

/// File extension of variant configuration documents.
pub const VARIANT_FILE_EXTENSION: &str = "json";

/// Name of the backup directory created next to the destination root.
pub const BACKUP_DIR_NAME: &str = "Backups";

/// Timestamp format used in backup file names (sortable, one-second resolution).
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Display-name suffix of the synthetic stock variant of a device.
pub const STOCK_SUFFIX: &str = "Stock";
