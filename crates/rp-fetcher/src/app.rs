//! Job orchestration.
//!
//! Strictly linear: fetch → normalize → write. The first error aborts the
//! run and nothing is written, so a failed run leaves the previous artifact
//! untouched.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use rp_client::{ApiKey, MetricsClient};
use rp_normalize::Normalizer;
use rp_persistence::{JsonDocumentWriter, WriteSummary};
use std::path::Path;
use tracing::info;

/// Realized price job.
#[derive(Debug)]
pub struct Application {
    config: AppConfig,
    normalizer: Normalizer,
    writer: JsonDocumentWriter,
}

impl Application {
    /// Create a new application from a validated config.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;

        let normalizer = Normalizer::new(config.normalize.options());
        let writer = JsonDocumentWriter::new(&config.output.path);

        Ok(Self {
            config,
            normalizer,
            writer,
        })
    }

    /// Run against the live API, reading the key from the environment.
    ///
    /// A missing key fails here, before any client is built.
    pub async fn run(&self) -> AppResult<WriteSummary> {
        let api_key = ApiKey::from_env(&self.config.api.key_env)
            .map_err(|e| AppError::Config(e.to_string()))?;
        self.run_with_key(&api_key).await
    }

    /// Run against the live API with an explicit key.
    pub async fn run_with_key(&self, api_key: &ApiKey) -> AppResult<WriteSummary> {
        let client = MetricsClient::new(&self.config.api.endpoint, self.config.api.timeout())?
            .with_preview_chars(self.config.api.preview_chars);

        let response = client.fetch(api_key).await?;
        self.process(&response.body)
    }

    /// Normalize and write a previously captured response body.
    pub fn replay(&self, input: &Path) -> AppResult<WriteSummary> {
        info!(input = %input.display(), "Replaying captured response");
        let body = std::fs::read_to_string(input)?;
        // Files saved by spreadsheet tools often start with a UTF-8 BOM.
        self.process(body.strip_prefix('\u{feff}').unwrap_or(&body))
    }

    /// Normalize `body` and write the document.
    pub fn process(&self, body: &str) -> AppResult<WriteSummary> {
        let document = self.normalizer.normalize(body)?;
        let summary = self.writer.write(&document)?;
        Ok(summary)
    }
}
