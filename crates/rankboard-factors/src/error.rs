//! Error types for factor scoring.

use rankboard_data::DataError;
use thiserror::Error;

/// Result type for factor operations.
pub type Result<T> = std::result::Result<T, FactorError>;

/// Errors raised by the factor score engine.
///
/// Every variant except [`FactorError::Computation`] is detected before any
/// score is computed, so a failed run never yields a partial table.
#[derive(Debug, Error)]
pub enum FactorError {
    /// A required input column is absent.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Too few records to compute a standard deviation.
    #[error("Insufficient data: {records} record(s), at least {required} required")]
    InsufficientData {
        /// Records in the snapshot
        records: usize,
        /// Minimum records needed
        required: usize,
    },

    /// A required column contains missing or non-finite values.
    #[error("Missing values in column {column}: {count} row(s)")]
    NullValues {
        /// Column name
        column: String,
        /// Number of offending rows
        count: usize,
    },

    /// A factor input has zero variance and the engine rejects it.
    #[error("Degenerate distribution: column {0} has zero variance")]
    DegenerateDistribution(String),

    /// Error reading the snapshot.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Error from Polars operations.
    #[error("Computation error: {0}")]
    Computation(#[from] polars::prelude::PolarsError),
}
