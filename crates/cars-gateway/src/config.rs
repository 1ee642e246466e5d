//! Aggregation settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings applied to every aggregation.
///
/// The defaults reproduce plain fan-out: one task per descriptor, all
/// launched at once, no overall deadline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Maximum number of fetches running at once within one aggregation.
    /// `None` launches every task immediately. `Some(0)` is treated as 1.
    pub max_concurrency: Option<usize>,
    /// Deadline for a whole aggregation, in seconds. `None` relies on the
    /// client's per-request timeouts only.
    #[serde(with = "cars_core::secs::option")]
    pub request_timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Effective permit count, if fan-out is bounded
    pub(crate) fn permits(&self) -> Option<usize> {
        self.max_concurrency.map(|n| n.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.permits(), None);
    }

    #[test]
    fn test_parse_limits() {
        let config: GatewayConfig =
            toml::from_str("max_concurrency = 4\nrequest_timeout = 1.5").unwrap();
        assert_eq!(config.permits(), Some(4));
        assert_eq!(config.request_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_zero_limit_still_makes_progress() {
        assert_eq!(GatewayConfig::default().with_max_concurrency(0).permits(), Some(1));
    }
}
