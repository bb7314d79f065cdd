//! Bearer credential for the metrics API.
//!
//! Security notes:
//! - The secret is held in `Zeroizing` memory and wiped on drop.
//! - `Debug` never prints the secret.
//! - Never log key material.

use crate::error::{ClientError, ClientResult};
use zeroize::Zeroizing;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "BMP_API_KEY";

/// API key sent as `Authorization: Bearer <key>`.
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Wrap an already-resolved key.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Load the key from an environment variable.
    ///
    /// Surrounding whitespace is trimmed. A missing or blank variable is an
    /// error so no request is ever sent with an empty bearer token.
    pub fn from_env(var_name: &str) -> ClientResult<Self> {
        let raw = Zeroizing::new(
            std::env::var(var_name)
                .map_err(|_| ClientError::MissingApiKey(var_name.to_string()))?,
        );
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ClientError::MissingApiKey(var_name.to_string()));
        }
        Ok(Self::new(trimmed))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("super-secret-token");
        let debug = format!("{key:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_from_env_missing_var() {
        let err = ApiKey::from_env("RP_CLIENT_TEST_KEY_NEVER_SET").unwrap_err();
        assert!(
            matches!(err, ClientError::MissingApiKey(ref name) if name == "RP_CLIENT_TEST_KEY_NEVER_SET")
        );
    }

    #[test]
    fn test_from_env_trims_and_rejects_blank() {
        std::env::set_var("RP_CLIENT_TEST_KEY_BLANK", "   ");
        assert!(matches!(
            ApiKey::from_env("RP_CLIENT_TEST_KEY_BLANK"),
            Err(ClientError::MissingApiKey(_))
        ));

        std::env::set_var("RP_CLIENT_TEST_KEY_PADDED", "  abc123\n");
        let key = ApiKey::from_env("RP_CLIENT_TEST_KEY_PADDED").unwrap();
        assert_eq!(key.expose(), "abc123");
    }
}
