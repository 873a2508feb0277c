//! Error types for the forecasting pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while loading, cleaning, or forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Reading or parsing the input file failed.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },

    /// A column referenced by name does not exist in the table.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Missing values detected when not allowed.
    #[error("missing values detected in data")]
    MissingValues,

    /// Computation error (e.g., numerical issues during fitting).
    #[error("computation error: {0}")]
    ComputationError(String),
}
