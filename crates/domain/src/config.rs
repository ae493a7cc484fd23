//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_API_TIMEOUT_MS;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Admin REST backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (e.g. `https://admin.example.com/api`)
    pub base_url: String,
    /// Per-request timeout in milliseconds; also bounds the refresh call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout_ms: DEFAULT_API_TIMEOUT_MS, user_agent: None }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Credential persistence configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding persisted credentials. `None` keeps them in memory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<String>,
}

/// Tracing subscriber configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), json: false }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_API_TIMEOUT_MS
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://admin.example.com/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.timeout_ms, 30_000);
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.storage.credentials_path, None);
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn json_overrides_are_respected() {
        let config: Config = serde_json::from_str(
            r#"{
                "api": { "base_url": "http://localhost:4000", "timeout_ms": 500 },
                "storage": { "credentials_path": "/tmp/creds.json" },
                "logging": { "filter": "debug", "json": true }
            }"#,
        )
        .unwrap();

        assert_eq!(config.api.timeout(), Duration::from_millis(500));
        assert_eq!(config.storage.credentials_path.as_deref(), Some("/tmp/creds.json"));
        assert!(config.logging.json);
    }
}
