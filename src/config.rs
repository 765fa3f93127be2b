//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application settings
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Root of the variant catalogue source tree (`manufacturer/device/*.json`)
    pub source_dir: Option<PathBuf>,
    /// Default driver configuration directory to install into, used when no
    /// destination is passed explicitly
    pub destination_root: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/TabletVariantManager/config.toml`
/// - macOS: `~/Library/Application Support/TabletVariantManager/config.toml`
/// - Windows: `%APPDATA%\TabletVariantManager\config.toml`
///
/// # Validation
///
/// - `source_dir` must exist and be a directory if set
/// - `destination_root` is deliberately not validated here: the installer
///   treats whatever destination it receives as untrusted input and
///   provisions it itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: PathConfig::default(),
        }
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Checks if the configuration has been properly set up.
    ///
    /// A config is considered "configured" once the catalogue source
    /// directory is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.paths.source_dir.is_some()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("TabletVariantManager");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        // Serialize to TOML
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(source_dir) = &self.paths.source_dir {
            if !source_dir.exists() {
                anyhow::bail!(
                    "Catalogue source directory does not exist: {}",
                    source_dir.display()
                );
            }

            if !source_dir.is_dir() {
                anyhow::bail!(
                    "Catalogue source path is not a directory: {}",
                    source_dir.display()
                );
            }
        }

        Ok(())
    }

    /// Sets the catalogue source directory with validation.
    pub fn set_source_dir(&mut self, path: PathBuf) -> Result<()> {
        self.paths.source_dir = Some(path);
        self.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.source_dir, None);
        assert_eq!(config.paths.destination_root, None);
        // New config should not be considered configured
        assert!(!config.is_configured());
    }

    #[test]
    fn test_config_is_configured() {
        let mut config = Config::new();

        // Without a source directory, config is not configured
        assert!(!config.is_configured());

        config.paths.source_dir = Some(PathBuf::from("/some/path"));
        assert!(config.is_configured());
    }

    #[test]
    fn test_config_validate() {
        let config = Config::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_source_dir() {
        let temp_dir = TempDir::new().unwrap();

        let mut config = Config::new();
        config.paths.source_dir = Some(temp_dir.path().join("missing"));

        // Missing source directory fails validation
        assert!(config.validate().is_err());

        // An existing directory passes
        fs::create_dir(temp_dir.path().join("missing")).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_source_dir_must_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("catalog");
        fs::write(&file_path, "not a directory").unwrap();

        let mut config = Config::new();
        config.paths.source_dir = Some(file_path);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.paths.destination_root = Some(PathBuf::from("/var/lib/driver/Configurations"));

        // Manually save to temp location for testing
        let content = toml::to_string_pretty(&config).unwrap();
        fs::write(&config_file, content).unwrap();

        // Load and verify
        let content = fs::read_to_string(&config_file).unwrap();
        let loaded: Config = toml::from_str(&content).unwrap();

        assert_eq!(loaded, config);
    }
}
