//! Response unwrapping and CSV normalization for realized price data.
//!
//! Turns the loosely formatted body returned by the metrics API into a
//! typed, date-indexed `OutputDocument`:
//! 1. `payload`: undo the optional outer quoting and escaped newlines
//! 2. `table`: parse comma-delimited text, dropping an unnamed index column
//! 3. `normalizer`: validate columns and extract the series for a layout

pub mod error;
pub mod normalizer;
pub mod payload;
pub mod table;

pub use error::{ParseError, ParseResult};
pub use normalizer::{
    NormalizeOptions, Normalizer, DATE_COLUMN, PRICE_COLUMN, REALIZED_PRICE_COLUMN,
};
pub use payload::{unwrap_payload, Payload};
pub use table::Table;
