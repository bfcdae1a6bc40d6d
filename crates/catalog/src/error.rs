//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading and validating the course catalog.
///
/// All of these are startup errors: the catalog is loaded once at process
/// start and is read-only afterwards, so a bad catalog file never surfaces
/// mid-request.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The header row is missing a required column
    #[error("Catalog header is missing required column '{column}'")]
    MissingColumn { column: String },

    /// A line in the catalog file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two rows share the same course key
    #[error("Duplicate course key: {key}")]
    DuplicateKey { key: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
