//! Parsing and serialization of variant configuration documents.
//!
//! This module handles decoding variant files into [`TabletConfiguration`]
//! records and writing them back out in the driver's on-disk format.
//!
//! [`TabletConfiguration`]: crate::models::TabletConfiguration

pub mod variant_file;

// Re-export commonly used functions
pub use variant_file::{parse_variant_bytes, parse_variant_file, write_configuration, ParseError};
