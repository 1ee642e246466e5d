//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default downstream API location
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the downstream catalog API.
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the catalog API (without the `/api` suffix)
    pub base_url: String,
    /// Whole-request timeout, in seconds
    #[serde(with = "cars_core::secs")]
    pub timeout: Duration,
    /// TCP connect timeout, in seconds
    #[serde(with = "cars_core::secs")]
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: ClientConfig = toml::from_str(r#"base_url = "http://cars:3000""#).unwrap();
        assert_eq!(config.base_url, "http://cars:3000");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn test_fractional_timeout() {
        let config: ClientConfig = toml::from_str("timeout = 0.25").unwrap();
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
