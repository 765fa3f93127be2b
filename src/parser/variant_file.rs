//! Variant file decode/encode.
//!
//! A variant file is a single JSON document describing one tablet
//! configuration. Decoding only validates that the document is structurally
//! sound and declares a display name; everything beyond that belongs to the
//! driver's schema and is carried through opaquely.

use std::fs;
use std::io;
use std::path::Path;

use crate::models::TabletConfiguration;

/// Failure to decode a single variant file.
///
/// A parse failure is local to the offending file: catalogue scans skip the
/// file and continue, so one bad document never aborts discovery.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The bytes are not a structurally valid configuration document.
    #[error("malformed configuration document: {source}")]
    Malformed {
        /// Decode error reported by the JSON parser.
        #[from]
        source: serde_json::Error,
    },
    /// The document decoded, but its `Name` field is empty.
    #[error("configuration document declares no display name")]
    MissingName,
    /// The file could not be read at all.
    #[error("failed to read variant file: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

/// Decodes the raw bytes of one variant file.
///
/// Succeeds only if the bytes form a structurally valid document with a
/// non-empty display name.
pub fn parse_variant_bytes(bytes: &[u8]) -> Result<TabletConfiguration, ParseError> {
    let configuration: TabletConfiguration = serde_json::from_slice(bytes)?;

    if configuration.name.trim().is_empty() {
        return Err(ParseError::MissingName);
    }

    Ok(configuration)
}

/// Reads and decodes the variant file at `path`.
pub fn parse_variant_file(path: &Path) -> Result<TabletConfiguration, ParseError> {
    let bytes = fs::read(path)?;
    parse_variant_bytes(&bytes)
}

/// Serializes a configuration document to `path` as pretty-printed JSON,
/// the format the driver ships its own configurations in.
pub fn write_configuration(configuration: &TabletConfiguration, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(configuration).map_err(io::Error::other)?;
    fs::write(path, json)
}
