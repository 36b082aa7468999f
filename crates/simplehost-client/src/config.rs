//! HTTP client configuration.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ClientError;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "SIMPLEHOST_URL";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "SIMPLEHOST_APIKEY";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`HttpProvisioningClient`](crate::HttpProvisioningClient).
///
/// Resolution order: explicit values via [`ClientConfig::new`], or the
/// `SIMPLEHOST_URL` / `SIMPLEHOST_APIKEY` environment via
/// [`ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout for individual API calls. This is unrelated to
    /// the reconciler's polling ceiling.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a config from explicit values, validating the base URL.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|e| {
            ClientError::configuration(format!("invalid base URL '{base_url}': {e}"))
        })?;
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Loads the config from the environment.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = env::var(BASE_URL_ENV)
            .map_err(|_| ClientError::configuration(format!("{BASE_URL_ENV} is not set")))?;
        let api_key = env::var(API_KEY_ENV)
            .map_err(|_| ClientError::configuration(format!("{API_KEY_ENV} is not set")))?;
        Self::new(base_url, api_key)
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_valid_base_url() {
        let config = ClientConfig::new("https://api.example.net/v5", "key").unwrap();
        assert_eq!(config.base_url, "https://api.example.net/v5");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn rejects_an_invalid_base_url() {
        let err = ClientConfig::new("not a url", "key").unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
        assert!(err.to_string().contains("invalid base URL"));
    }

    #[test]
    fn timeout_override() {
        let config = ClientConfig::new("https://api.example.net", "key")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
