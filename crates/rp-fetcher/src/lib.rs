//! Realized price fetcher.
//!
//! One-shot batch job that orchestrates:
//! - Fetch: a single authenticated GET to the metrics API
//! - Normalize: unwrap, parse and type the CSV payload
//! - Write: replace the JSON artifact on disk

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
