//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API key not set: environment variable {0} is missing or empty")]
    MissingApiKey(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body_preview}")]
    Status { status: u16, body_preview: String },
}

pub type ClientResult<T> = Result<T, ClientError>;
