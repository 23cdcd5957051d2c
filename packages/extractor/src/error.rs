//! Error types for the extractor.
//!
//! Uses the dual-error pattern: `MetadataError` for the fatal document
//! identity failures raised by the metadata extractor, and `DocumentError`
//! as the crate-wide error that wraps it alongside I/O and serialization
//! failures.

use thiserror::Error;

/// Failure to recover the mandatory identity fields of a document.
///
/// Always fatal: an extraction never returns partial metadata.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The `ukm:SecondaryMetadata` section is absent.
    #[error("Required SecondaryMetadata section missing")]
    MissingSecondaryMetadata,

    /// A mandatory field (`Year` or `Number`) is absent or has no value.
    #[error("Required metadata field missing: {field}")]
    MissingField { field: &'static str },

    /// A mandatory field is present but not a positive integer.
    #[error("Metadata field {field} is not a positive integer: '{value}'")]
    InvalidField { field: &'static str, value: String },
}

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document identity could not be recovered.
    #[error("Metadata extraction failed: {0}")]
    Metadata(#[from] MetadataError),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("CSV serialization failed: {0}")]
    CsvSerialization(#[from] csv::Error),

    /// A schedule selection source could not be interpreted.
    #[error("Invalid schedule selection: {0}")]
    InvalidSelection(String),

    /// Invalid base URL for canonical links.
    #[error("Invalid base URL: '{0}'. Expected an http(s) URL such as https://www.legislation.gov.uk")]
    InvalidBaseUrl(String),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, DocumentError>;
