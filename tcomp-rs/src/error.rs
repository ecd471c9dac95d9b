//! Error types for the comparator.

use thiserror::Error;

/// Result type alias for comparator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while indexing, comparing, or exporting.
#[derive(Error, Debug)]
pub enum Error {
    /// Input file does not exist.
    #[error("file not found: {0}")]
    NotFound(String),

    /// Input is not well-formed XML.
    #[error("XML parse error in {path}: {detail}")]
    Parse { path: String, detail: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O failure while writing a CSV export.
    #[error("CSV export error: {0}")]
    Export(std::io::Error),
}
