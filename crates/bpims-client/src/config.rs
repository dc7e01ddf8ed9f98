//! # Client Configuration
//!
//! Configuration for the REST client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BPIMS_API_URL=https://pos.example.ph/api                           │
//! │     BPIMS_TIMEOUT_SECS=20                                              │
//! │     BPIMS_DOWNLOAD_DIR=/sdcard/Download                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bpims/client.toml (Linux)                                │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! base_url = "https://pos.example.ph/api"
//! timeout_secs = 15
//! download_dir = "/home/pos/Downloads"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

/// REST client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the BPIMS backend API, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory receipt and report PDFs are written into.
    /// Defaults to the process working directory when unset.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: default_timeout_secs(),
            download_dir: None,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at the given base URL, defaults elsewhere.
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)
                    .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url must not be empty".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ClientError::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BPIMS_API_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.base_url = url;
        }

        if let Ok(timeout) = std::env::var("BPIMS_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse::<u64>() {
                self.timeout_secs = t;
            }
        }

        if let Ok(dir) = std::env::var("BPIMS_DOWNLOAD_DIR") {
            self.download_dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ph", "bpims", "bpims")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    /// Joins an endpoint name onto the base URL.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn validation_rejects_bad_urls() {
        let mut config = ClientConfig::new("ftp://pos.example.ph");
        assert!(config.validate().is_err());

        config.base_url = String::new();
        assert!(config.validate().is_err());

        config.base_url = "https://pos.example.ph/api".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn endpoint_url_handles_trailing_slash() {
        let config = ClientConfig::new("https://pos.example.ph/api/");
        assert_eq!(
            config.endpoint_url("getCart"),
            "https://pos.example.ph/api/getCart"
        );
    }

    #[test]
    fn toml_round_trip() {
        let config = ClientConfig::new("https://pos.example.ph/api");
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.base_url, config.base_url);
    }
}
