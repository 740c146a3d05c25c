//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading a snapshot.
#[derive(Debug, Error)]
pub enum DataError {
    /// CSV reading or deserialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A required column is absent from the file header
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The same symbol appears on more than one row
    #[error("Duplicate symbol: {0}")]
    DuplicateSymbol(String),
}
