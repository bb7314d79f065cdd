//! HTTP client for the Bitcoin Magazine Pro metrics API.
//!
//! Issues the single authenticated GET a run needs and hands the body back
//! as text. The credential is passed in explicitly as an `ApiKey`; only
//! `ApiKey::from_env` touches the process environment.

pub mod api_key;
pub mod client;
pub mod error;

pub use api_key::{ApiKey, API_KEY_ENV};
pub use client::{MetricsClient, RawResponse, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use error::{ClientError, ClientResult};
