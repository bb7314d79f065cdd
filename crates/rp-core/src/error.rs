//! Error types for rp-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown series layout: {0} (expected records, columnar or last_column)")]
    UnknownLayout(String),

    #[error("Unknown row policy: {0} (expected strict or drop_invalid)")]
    UnknownRowPolicy(String),

    #[error("Columnar series length mismatch: {dates} dates, {values} values")]
    LengthMismatch { dates: usize, values: usize },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
