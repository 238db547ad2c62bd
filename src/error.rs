//! Error types for the barcode library.
//!
//! This module defines all error types that can occur while resolving,
//! building, and drawing barcode flowables.

/// Result type alias for barcode library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during barcode processing.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)] // "Invalid" prefix is intentional for clarity
pub enum Error {
    /// Symbology name not present in the catalog
    #[error("Unknown symbology: '{0}'")]
    UnknownSymbology(String),

    /// Length attribute could not be parsed
    #[error("Invalid length: '{0}'")]
    InvalidLength(String),

    /// Color attribute could not be resolved
    #[error("Invalid color: '{0}'")]
    InvalidColor(String),

    /// Style attribute has a value the symbology cannot interpret
    #[error("Invalid value for style attribute {name}: '{value}'")]
    InvalidStyle {
        /// Attribute name
        name: String,
        /// Raw attribute value
        value: String,
    },

    /// The symbology rejected the value (encoding or checksum failure)
    #[error("Barcode error: {0}")]
    Barcode(String),

    /// Markup could not be read
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
