//! Configuration file handling for cars-cli

use anyhow::{Context, Result};
use cars_client::ClientConfig;
use cars_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::OutputFormat;

/// Configuration for the CLI tool
///
/// ```toml
/// output = "table"
///
/// [api]
/// base_url = "http://localhost:3000"
/// timeout = 30
///
/// [aggregation]
/// max_concurrency = 8
/// request_timeout = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Catalog API connection
    pub api: ClientConfig,
    /// Fan-out limits
    pub aggregation: GatewayConfig,
    /// Default output format
    pub output: Option<OutputFormat>,
    /// Disable colored output
    pub no_color: Option<bool>,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub max_concurrency: Option<usize>,
    pub request_timeout: Option<Duration>,
    pub output: Option<OutputFormat>,
    pub no_color: bool,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("cars-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(&self, overrides: Overrides) -> MergedConfig {
        let mut client = self.api.clone();
        if let Some(url) = overrides.api_url {
            client.base_url = url;
        }

        let mut gateway = self.aggregation.clone();
        if let Some(limit) = overrides.max_concurrency {
            gateway.max_concurrency = Some(limit);
        }
        if let Some(timeout) = overrides.request_timeout {
            gateway.request_timeout = Some(timeout);
        }

        MergedConfig {
            client,
            gateway,
            output: overrides.output.or(self.output).unwrap_or_default(),
            no_color: overrides.no_color || self.no_color.unwrap_or(false),
        }
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub client: ClientConfig,
    pub gateway: GatewayConfig,
    pub output: OutputFormat,
    pub no_color: bool,
}
