//! Variant installation workflow.
//!
//! Installs a resolved variant into the driver's live configuration
//! directory in four strictly ordered phases: provision directories, resolve
//! the variant, back up the existing configuration, write the new one. Each
//! phase can fail independently and stops the pipeline with an error naming
//! the phase; phases that already completed are never rolled back, so a
//! caller that cancels mid-install keeps whatever progress stood.
//!
//! The destination tree is shared with a running driver process that may
//! read it concurrently. No cross-process locking protocol exists between
//! the two; correctness rests on the atomicity of the individual rename and
//! write operations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use tracing::{debug, info};

use crate::constants::{BACKUP_DIR_NAME, BACKUP_TIMESTAMP_FORMAT, VARIANT_FILE_EXTENSION};
use crate::models::TabletVariant;
use crate::parser;
use crate::services::repository::{QueryError, VariantRepository};

/// Failure of one install phase. The variant tells the caller which phase
/// stopped the pipeline; completed phases stand.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// The driver did not supply a destination directory.
    #[error("the driver did not supply a configuration directory")]
    DestinationNotConfigured,
    /// The destination does not exist and has no parent to create it under.
    #[error("the destination path is not valid: {path}")]
    InvalidDestinationPath {
        /// The rejected destination path.
        path: PathBuf,
    },
    /// Provisioning the destination directories failed.
    #[error("failed to prepare destination directory {path}: {source}")]
    Directories {
        /// The directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The selected variant is no longer in the catalogue. This is a real
    /// race: the file may have been deleted between listing and selection.
    #[error("the selected variant is not available: {source}")]
    VariantUnavailable {
        /// The lookup failure.
        source: QueryError,
    },
    /// Moving the previous configuration into the backup tree failed. The
    /// previous configuration is still in place.
    #[error("failed to back up the previous configuration {path}: {source}")]
    Backup {
        /// The file or directory the backup phase was operating on.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Writing the new configuration failed. The backup phase already
    /// completed, so the device is left without an override until a retry.
    #[error("failed to write the new configuration {path} (the backup was taken): {source}")]
    Write {
        /// The target configuration path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// What an install actually did, for the front end to report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Where the previous configuration was moved, if one existed.
    pub backup: Option<PathBuf>,
    /// Path of the newly written configuration; `None` for a stock install.
    pub written: Option<PathBuf>,
}

/// Executes the install workflow against a repository's catalogue.
pub struct Installer<'a> {
    repository: &'a VariantRepository,
    // Installs must not interleave: two concurrent backup/write sequences
    // against the same device would corrupt the backup ordering guarantee.
    guard: Mutex<()>,
}

impl<'a> Installer<'a> {
    /// Creates an installer over the given repository.
    #[must_use]
    pub fn new(repository: &'a VariantRepository) -> Self {
        Self {
            repository,
            guard: Mutex::new(()),
        }
    }

    /// Installs `variant_name` of `manufacturer`/`device` under
    /// `destination_root`, the driver's configuration directory.
    ///
    /// `destination_root` is treated as untrusted input: it may be empty or
    /// point at a directory that does not exist yet. The phases run strictly
    /// in order and a failed phase stops the pipeline. In particular, a
    /// successful backup followed by a failed write leaves the device
    /// without an override until the user retries; the returned error says
    /// so rather than undoing the backup.
    pub fn install(
        &self,
        manufacturer: &str,
        device: &str,
        variant_name: &str,
        destination_root: &Path,
    ) -> Result<InstallOutcome, InstallError> {
        let _serialized = self.guard.lock().unwrap_or_else(PoisonError::into_inner);

        ensure_directories(destination_root, manufacturer)?;

        let variant = self
            .repository
            .resolve_variant(manufacturer, device, variant_name)
            .map_err(|source| InstallError::VariantUnavailable { source })?;

        let backup = back_up_existing(destination_root, manufacturer, device)?;
        let written = write_new(variant, destination_root, manufacturer, device)?;

        info!(manufacturer, device, variant = variant_name, "variant installed");

        Ok(InstallOutcome { backup, written })
    }
}

/// Phase 1: make sure the destination root and its manufacturer
/// subdirectory exist, creating them if needed.
fn ensure_directories(destination_root: &Path, manufacturer: &str) -> Result<(), InstallError> {
    if destination_root.as_os_str().is_empty() {
        return Err(InstallError::DestinationNotConfigured);
    }

    if !destination_root.exists() {
        // A path with no parent has hit the platform's filesystem root;
        // creating it would escape the intended scope.
        if destination_root.parent().is_none() {
            return Err(InstallError::InvalidDestinationPath {
                path: destination_root.to_path_buf(),
            });
        }

        fs::create_dir_all(destination_root).map_err(|source| InstallError::Directories {
            path: destination_root.to_path_buf(),
            source,
        })?;
    }

    let manufacturer_dir = destination_root.join(manufacturer);
    if !manufacturer_dir.exists() {
        fs::create_dir_all(&manufacturer_dir).map_err(|source| InstallError::Directories {
            path: manufacturer_dir.clone(),
            source,
        })?;
    }

    Ok(())
}

/// Phase 3: move any existing configuration for the device into the backup
/// tree next to the destination root. A missing file is a no-op success.
///
/// The file is moved, not copied, so a failure here leaves the original in
/// place and recoverable.
fn back_up_existing(
    destination_root: &Path,
    manufacturer: &str,
    device: &str,
) -> Result<Option<PathBuf>, InstallError> {
    let active_path = active_config_path(destination_root, manufacturer, device);
    if !active_path.exists() {
        return Ok(None);
    }

    let Some(parent) = destination_root.parent() else {
        return Err(InstallError::InvalidDestinationPath {
            path: destination_root.to_path_buf(),
        });
    };

    let backup_dir = parent.join(BACKUP_DIR_NAME).join(manufacturer);
    fs::create_dir_all(&backup_dir).map_err(|source| InstallError::Backup {
        path: backup_dir.clone(),
        source,
    })?;

    let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
    let backup_path = free_backup_path(&backup_dir, &timestamp, device);

    fs::rename(&active_path, &backup_path).map_err(|source| InstallError::Backup {
        path: active_path.clone(),
        source,
    })?;

    info!(
        from = %active_path.display(),
        to = %backup_path.display(),
        "backed up previous configuration"
    );

    Ok(Some(backup_path))
}

/// Phase 4: write the variant's document to the destination, or do nothing
/// for the stock entry (the backup phase already relocated any override).
fn write_new(
    variant: &TabletVariant,
    destination_root: &Path,
    manufacturer: &str,
    device: &str,
) -> Result<Option<PathBuf>, InstallError> {
    let Some(configuration) = variant.configuration() else {
        debug!(device, "stock variant selected, leaving no override in place");
        return Ok(None);
    };

    let target = active_config_path(destination_root, manufacturer, device);

    // Nothing should exist at the target after the backup phase, but a file
    // that appeared in the meantime is deleted rather than trusted.
    if target.exists() {
        fs::remove_file(&target).map_err(|source| InstallError::Write {
            path: target.clone(),
            source,
        })?;
    }

    parser::write_configuration(configuration, &target).map_err(|source| InstallError::Write {
        path: target.clone(),
        source,
    })?;

    Ok(Some(target))
}

/// Path of the active override for a device under the destination root.
fn active_config_path(destination_root: &Path, manufacturer: &str, device: &str) -> PathBuf {
    destination_root
        .join(manufacturer)
        .join(format!("{device}.{VARIANT_FILE_EXTENSION}"))
}

/// First backup path that does not exist yet. Timestamps have one-second
/// resolution, so two installs within the same second would otherwise
/// collide; an existing backup is never overwritten.
fn free_backup_path(backup_dir: &Path, timestamp: &str, device: &str) -> PathBuf {
    let candidate = backup_dir.join(format!("{timestamp}_{device}.{VARIANT_FILE_EXTENSION}"));
    if !candidate.exists() {
        return candidate;
    }

    let mut attempt = 1u32;
    loop {
        let candidate =
            backup_dir.join(format!("{timestamp}_{attempt}_{device}.{VARIANT_FILE_EXTENSION}"));
        if !candidate.exists() {
            return candidate;
        }
        attempt += 1;
    }
}
