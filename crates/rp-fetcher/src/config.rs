//! Application configuration.

use crate::error::{AppError, AppResult};
use rp_client::{API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use rp_core::{RowPolicy, SeriesLayout, DEFAULT_PREVIEW_CHARS};
use rp_normalize::NormalizeOptions;
use rp_persistence::DEFAULT_OUTPUT_PATH;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "RP_CONFIG";

/// Config file used when neither the CLI nor `RP_CONFIG` names one.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Metrics API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Full metric URL. Default: the `/v1` realized price endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Environment variable holding the bearer token. Default: BMP_API_KEY.
    #[serde(default = "default_key_env")]
    pub key_env: String,
    /// Request timeout (seconds). Default: 30.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Response characters echoed to the log. Default: 200.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_key_env() -> String {
    API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            key_env: default_key_env(),
            timeout_secs: default_timeout_secs(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Normalization configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Output layout. Default: records.
    #[serde(default)]
    pub layout: SeriesLayout,
    /// Row policy. If None, the layout's default is used
    /// (strict for named layouts, drop_invalid for last_column).
    #[serde(default)]
    pub row_policy: Option<RowPolicy>,
}

impl NormalizeConfig {
    pub fn options(&self) -> NormalizeOptions {
        let options = NormalizeOptions::for_layout(self.layout);
        match self.row_policy {
            Some(policy) => options.with_row_policy(policy),
            None => options,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file, relative to the working directory.
    #[serde(default = "default_output_path")]
    pub path: String,
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Metrics API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Normalization configuration.
    #[serde(default)]
    pub normalize: NormalizeConfig,
    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// Path precedence: `path` argument > `RP_CONFIG` > `config/default.toml`.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let config_path = path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        if Path::new(&config_path).exists() {
            tracing::info!(path = %config_path, "Loading configuration");
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        Self::from_toml(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> AppResult<()> {
        let endpoint = self.api.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api.endpoint must be an http(s) URL, got {endpoint:?}"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::Config(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.api.key_env.trim().is_empty() {
            return Err(AppError::Config("api.key_env must not be empty".to_string()));
        }
        if self.output.path.trim().is_empty() {
            return Err(AppError::Config("output.path must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api.key_env, "BMP_API_KEY");
        assert_eq!(config.api.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.api.preview_chars, DEFAULT_PREVIEW_CHARS);
        assert_eq!(config.output.path, "data/realized-price.json");
        assert_eq!(config.normalize.layout, SeriesLayout::Records);
        assert_eq!(config.normalize.options().row_policy, RowPolicy::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.api.preview_chars, 200);
        assert_eq!(config.normalize.layout, SeriesLayout::Records);
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            endpoint = "https://api.bitcoinmagazinepro.com/metrics/realized-price"

            [normalize]
            layout = "last_column"

            [output]
            path = "site/data/rp.json"
            "#,
        )
        .unwrap();
        assert!(!config.api.endpoint.contains("/v1/"));
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.normalize.layout, SeriesLayout::LastColumn);
        assert_eq!(config.normalize.options().row_policy, RowPolicy::DropInvalid);
        assert_eq!(config.output.path, "site/data/rp.json");
    }

    #[test]
    fn test_row_policy_override() {
        let config = AppConfig::from_toml(
            r#"
            [normalize]
            layout = "records"
            row_policy = "drop_invalid"
            "#,
        )
        .unwrap();
        assert_eq!(config.normalize.options().row_policy, RowPolicy::DropInvalid);
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let err = AppConfig::from_toml("[normalize]\nlayout = \"rows\"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_validation_failures() {
        for toml_str in [
            "[api]\nendpoint = \"ftp://example.com\"",
            "[api]\ntimeout_secs = 0",
            "[api]\nkey_env = \"  \"",
            "[output]\npath = \"\"",
        ] {
            assert!(
                matches!(AppConfig::from_toml(toml_str), Err(AppError::Config(_))),
                "expected config error for {toml_str:?}"
            );
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load(Some("/nonexistent/rp/config.toml")).unwrap();
        assert_eq!(config.output.path, DEFAULT_OUTPUT_PATH);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("endpoint"));
        assert!(toml_str.contains("layout = \"records\""));
    }
}
