//! Serde helpers for `Duration` values written as (fractional) seconds in
//! config files.
//!
//! ```
//! # use std::time::Duration;
//! #[derive(serde::Deserialize)]
//! struct Cfg {
//!     #[serde(with = "cars_core::secs")]
//!     timeout: Duration,
//! }
//! let cfg: Cfg = serde_json::from_str(r#"{"timeout": 2.5}"#).unwrap();
//! assert_eq!(cfg.timeout, Duration::from_millis(2500));
//! ```

use std::time::Duration;

use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
}

/// Same as the parent module, for `Option<Duration>`
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&d.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Cfg {
        #[serde(with = "super")]
        timeout: Duration,
        #[serde(default, with = "super::option")]
        deadline: Option<Duration>,
    }

    #[test]
    fn test_missing_optional_is_none() {
        let cfg: Cfg = serde_json::from_str(r#"{"timeout": 3}"#).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.deadline, None);
    }

    #[test]
    fn test_negative_is_rejected() {
        assert!(serde_json::from_str::<Cfg>(r#"{"timeout": -1}"#).is_err());
    }

    #[test]
    fn test_serialize_as_seconds() {
        let cfg = Cfg {
            timeout: Duration::from_millis(1500),
            deadline: Some(Duration::from_secs(2)),
        };
        assert_eq!(
            serde_json::to_string(&cfg).unwrap(),
            r#"{"timeout":1.5,"deadline":2.0}"#
        );
    }
}
