//! Error types for export writing.

use thiserror::Error;

/// Errors that can occur while writing a collection to an archive.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Archive writing failed
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
