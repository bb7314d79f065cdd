//! HTTP client for the metrics endpoint.
//!
//! One GET per run, bearer-authenticated, bounded by a timeout. Non-2xx
//! responses are errors; there is no retry. Re-running the job is the
//! recovery path.

use crate::api_key::ApiKey;
use crate::error::{ClientError, ClientResult};
use reqwest::Client;
use rp_core::{preview, DEFAULT_PREVIEW_CHARS};
use std::time::Duration;
use tracing::{debug, info};

/// Realized price endpoint.
///
/// If this ever 404s, the same path without `/v1` is the other known
/// variant; it is selectable through `api.endpoint` in the config.
pub const DEFAULT_ENDPOINT: &str = "https://api.bitcoinmagazinepro.com/v1/metrics/realized-price";

/// Default timeout for the request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);


/// Successful response from the metrics API.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Body as text. May be empty; emptiness is judged by the normalizer.
    pub body: String,
}

impl RawResponse {
    /// First `max_chars` characters of the body.
    pub fn preview(&self, max_chars: usize) -> &str {
        preview(&self.body, max_chars)
    }
}

/// Client for the metrics API.
#[derive(Debug)]
pub struct MetricsClient {
    /// HTTP client.
    client: Client,
    /// Full metric URL.
    endpoint: String,
    /// Body characters to log.
    preview_chars: usize,
}

impl MetricsClient {
    /// Create a new metrics client.
    ///
    /// # Arguments
    /// * `endpoint` - Full metric URL (e.g. `DEFAULT_ENDPOINT`)
    /// * `timeout` - Whole-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        })
    }

    /// Set how many body characters are echoed to the log.
    #[must_use]
    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    /// Fetch the metric as raw text.
    ///
    /// Logs the status code and a short body prefix so unattended runs can
    /// be debugged from the job log.
    pub async fn fetch(&self, api_key: &ApiKey) -> ClientResult<RawResponse> {
        info!(url = %self.endpoint, "Fetching metric");

        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(api_key.expose())
            .send()
            .await?;

        let status = response.status();
        info!(status = status.as_u16(), "Metrics API responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body_preview: preview(&body, self.preview_chars).to_string(),
            });
        }

        let body = response.text().await?;
        info!(
            bytes = body.len(),
            preview = %preview(&body, self.preview_chars),
            "Received response body"
        );
        debug!(chars = body.chars().count(), "Response body size");

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
