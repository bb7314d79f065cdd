//! Core domain types for the realized-price fetcher.
//!
//! This crate provides the types shared by the fetch, normalize and write
//! stages:
//! - `SeriesLayout`, `RowPolicy`: how a response is turned into a series
//! - `PricePoint`, `ValuePoint`, `ColumnarSeries`: output units
//! - `OutputDocument`: the full JSON artifact written each run

pub mod date;
pub mod error;
pub mod layout;
pub mod series;
pub mod text;

pub use date::{parse_metric_date, DATE_FORMAT};
pub use error::{CoreError, Result};
pub use layout::{RowPolicy, SeriesLayout};
pub use series::{ColumnarSeries, OutputDocument, PricePoint, ValuePoint};
pub use text::{preview, DEFAULT_PREVIEW_CHARS};
