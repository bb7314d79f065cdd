//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Client(#[from] rp_client::ClientError),

    #[error("Parse error: {0}")]
    Parse(#[from] rp_normalize::ParseError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] rp_persistence::PersistenceError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] rp_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
