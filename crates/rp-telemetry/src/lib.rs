//! Structured logging for the realized-price fetcher.
//!
//! Runs are usually unattended (scheduled CI jobs), so every stage logs to
//! stdout: status codes, response previews, column lists, row counts.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, DEFAULT_FILTER};
