//! Normalization error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Empty response from metrics API")]
    EmptyResponse,

    #[error("Parsed empty table (columns: {columns:?}, rows: {rows})")]
    EmptyTable { columns: Vec<String>, rows: usize },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid value {value:?} in column {column} at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid date {value:?} at row {row}")]
    InvalidDate { row: usize, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ParseResult<T> = Result<T, ParseError>;
