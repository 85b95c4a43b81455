//! Configuration types for the enrichment client.

use crate::retry::DEFAULT_MAX_RETRIES;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production Stairwell endpoint.
pub const DEFAULT_BASE_URL: &str = "https://app.stairwell.com/";

/// Default timeout for a single HTTP attempt in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Configuration for an enrichment client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the Stairwell service
    pub base_url: String,

    /// Timeout applied to each HTTP attempt (not to the whole lookup)
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,

    /// Retries allowed after the first attempt
    pub max_retries: u32,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: concat!("sw-enrich/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-attempt request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parses the base URL, appending the trailing slash relative joins rely on.
    pub fn parsed_base_url(&self) -> Result<Url, String> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)
            .map_err(|e| format!("invalid base_url '{}': {e}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }
        if url.cannot_be_a_base() {
            return Err(format!("base_url '{}' cannot carry a path", self.base_url));
        }
        Ok(url)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.parsed_base_url()?;
        if self.request_timeout.is_zero() {
            return Err("request_timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Serde helper storing durations as whole seconds.
mod duration_secs {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
