//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `ADMINHUB_API_BASE_URL` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ADMINHUB_API_BASE_URL`: Backend base URL (required)
//! - `ADMINHUB_API_TIMEOUT_MS`: Request timeout in milliseconds
//! - `ADMINHUB_API_USER_AGENT`: User-Agent header
//! - `ADMINHUB_CREDENTIALS_PATH`: Credential file; unset keeps credentials in memory
//! - `ADMINHUB_LOG_FILTER`: Default tracing filter
//! - `ADMINHUB_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./adminhub.json` or `./adminhub.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use adminhub_domain::constants::DEFAULT_API_TIMEOUT_MS;
use adminhub_domain::{AdminHubError, ApiConfig, Config, LoggingConfig, Result, StorageConfig};
use url::Url;

/// Load configuration with automatic fallback strategy
///
/// Environment first. A missing base URL falls back to a config file; an
/// invalid environment value is an error rather than a fallback.
///
/// # Errors
/// Returns `AdminHubError::Config` if neither source yields a valid config.
pub fn load() -> Result<Config> {
    if std::env::var_os("ADMINHUB_API_BASE_URL").is_none() {
        tracing::debug!("ADMINHUB_API_BASE_URL unset, trying config file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `AdminHubError::Config` if the base URL is missing or any value
/// is invalid.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("ADMINHUB_API_BASE_URL")?;
    let timeout_ms = match std::env::var("ADMINHUB_API_TIMEOUT_MS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| AdminHubError::Config(format!("Invalid API timeout: {}", e)))?,
        Err(_) => DEFAULT_API_TIMEOUT_MS,
    };
    let user_agent = env_opt("ADMINHUB_API_USER_AGENT");
    let credentials_path = env_opt("ADMINHUB_CREDENTIALS_PATH");

    let mut logging = LoggingConfig::default();
    if let Some(filter) = env_opt("ADMINHUB_LOG_FILTER") {
        logging.filter = filter;
    }
    logging.json = env_bool("ADMINHUB_LOG_JSON", false);

    let config = Config {
        api: ApiConfig { base_url, timeout_ms, user_agent },
        storage: StorageConfig { credentials_path },
        logging,
    };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AdminHubError::Config` if the file is missing, unreadable or
/// invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AdminHubError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            AdminHubError::Config(
                "No config file found and ADMINHUB_API_BASE_URL is not set".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AdminHubError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content; format follows the extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AdminHubError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AdminHubError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AdminHubError::Config(format!("Unsupported config format: {}", extension))),
    }
}

fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(&config.api.base_url).map_err(|e| {
        AdminHubError::Config(format!("Invalid API base URL '{}': {}", config.api.base_url, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AdminHubError::Config(format!(
            "API base URL must be http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.api.timeout_ms == 0 {
        return Err(AdminHubError::Config("API timeout must be greater than zero".into()));
    }
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.json", "config.toml", "adminhub.json", "adminhub.toml"];

    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        AdminHubError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
