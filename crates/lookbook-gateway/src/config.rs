//! Remote API client configuration.
//!
//! Resolution order mirrors the rest of the app's configuration handling:
//! `config.toml` under the platform config directory first, then environment
//! variables. Everything has a default, so resolution never fails.

use lookbook_infrastructure::LookbookPaths;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the remote service base URL.
pub const ENV_API_URL: &str = "LOOKBOOK_API_URL";
/// Environment variable overriding the per-request timeout, in seconds.
pub const ENV_API_TIMEOUT_SECS: &str = "LOOKBOOK_API_TIMEOUT_SECS";

/// Configuration for the HTTP gateways.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the remote service, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Creates a configuration for the given base URL with the default
    /// timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
        .normalized()
    }

    /// Loads configuration from `config.toml` and environment variables.
    ///
    /// Priority:
    /// 1. Environment variables (`LOOKBOOK_API_URL`, `LOOKBOOK_API_TIMEOUT_SECS`)
    /// 2. `config.toml` under the platform config directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        let from_file = LookbookPaths::config_file()
            .ok()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|content| match Self::from_toml(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("[ApiConfig] Ignoring unreadable config.toml: {}", e);
                    None
                }
            });

        from_file
            .unwrap_or_default()
            .with_overrides(env::var(ENV_API_URL).ok(), env::var(ENV_API_TIMEOUT_SECS).ok())
    }

    /// Parses a configuration from TOML text. Missing keys fall back to the
    /// defaults.
    pub fn from_toml(content: &str) -> lookbook_core::error::Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Applies raw override values on top of this configuration.
    ///
    /// An unparseable timeout override is ignored with a warning rather than
    /// failing resolution.
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(raw) = timeout_secs {
            match raw.parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => {
                    tracing::warn!("[ApiConfig] Ignoring invalid timeout override: '{}'", raw);
                }
            }
        }
        self.normalized()
    }

    /// The per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn normalized(mut self) -> Self {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        self
    }
}
