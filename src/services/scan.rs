//! Catalogue discovery.
//!
//! Scans a source tree of the shape `<root>/<manufacturer>/<device>/*.json`
//! into an immutable [`VariantCatalog`]. Every device gets a synthetic stock
//! variant first; each parseable file after it contributes an override
//! variant named after the document's declared name, not the filename.
//! A malformed file is skipped with a warning (partial catalogues are
//! acceptable); a missing root directory is the only fatal outcome.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::VARIANT_FILE_EXTENSION;
use crate::models::{DeviceEntry, ManufacturerEntry, TabletVariant, VariantCatalog};
use crate::parser;

/// Failure to build the catalogue.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The catalogue root directory does not exist.
    #[error("catalogue root directory not found: {path}")]
    RootNotFound {
        /// The root path that was requested.
        path: PathBuf,
    },
    /// The root directory exists but could not be listed.
    #[error("failed to read catalogue root {path}: {source}")]
    RootUnreadable {
        /// The root path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Builds a catalogue from the source tree rooted at `root`.
///
/// The scan is read-only and never mutates the source tree. Directory
/// entries are visited in name order so discovery order is stable across
/// platforms.
pub fn build_catalog(root: &Path) -> Result<VariantCatalog, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let manufacturer_dirs = sorted_entries(root).map_err(|source| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut manufacturers = Vec::new();

    for manufacturer_dir in manufacturer_dirs {
        if !manufacturer_dir.is_dir() {
            continue;
        }
        let Some(manufacturer_name) = entry_name(&manufacturer_dir) else {
            continue;
        };

        let device_dirs = match sorted_entries(&manufacturer_dir) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(
                    directory = %manufacturer_dir.display(),
                    %error,
                    "skipping unreadable manufacturer directory"
                );
                continue;
            }
        };

        let mut devices = Vec::new();

        for device_dir in device_dirs {
            if !device_dir.is_dir() {
                continue;
            }
            let Some(device_name) = entry_name(&device_dir) else {
                continue;
            };

            devices.push(scan_device(&device_dir, &device_name));
        }

        // A manufacturer with no device directories contributes nothing.
        if !devices.is_empty() {
            manufacturers.push(ManufacturerEntry::new(manufacturer_name, devices));
        }
    }

    Ok(VariantCatalog::new(manufacturers))
}

/// Collects one device directory into its variant list, stock entry first.
fn scan_device(device_dir: &Path, device_name: &str) -> DeviceEntry {
    let mut variants = vec![TabletVariant::stock(device_name)];

    let files = match sorted_entries(device_dir) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(
                directory = %device_dir.display(),
                %error,
                "skipping unreadable device directory"
            );
            return DeviceEntry::new(device_name, variants);
        }
    };

    for file in files {
        if !file.is_file() {
            continue;
        }
        if file.extension().and_then(|ext| ext.to_str()) != Some(VARIANT_FILE_EXTENSION) {
            continue;
        }

        match parser::parse_variant_file(&file) {
            Ok(configuration) => {
                debug!(
                    file = %file.display(),
                    variant = %configuration.name,
                    "discovered variant"
                );
                let name = configuration.name.clone();
                variants.push(TabletVariant::override_of(name, configuration));
            }
            Err(error) => {
                warn!(file = %file.display(), %error, "skipping malformed variant file");
            }
        }
    }

    DeviceEntry::new(device_name, variants)
}

/// Lists a directory's entries sorted by path, so scans are deterministic
/// regardless of the platform's readdir order.
fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

/// File name of a directory entry as UTF-8; non-UTF-8 names are skipped.
fn entry_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
