//! Tracing subscriber setup

use adminhub_domain::{AdminHubError, LoggingConfig, Result};
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG` if set, otherwise from `config.filter`.
///
/// # Errors
/// Returns `AdminHubError::Config` if the configured directive is invalid.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|e| {
        AdminHubError::Config(format!("Invalid log filter '{}': {}", config.filter, e))
    })
}

/// Install the global subscriber. Logs go to stderr so stdout stays free for
/// command output.
///
/// # Errors
/// Returns `AdminHubError::Config` for a bad filter and
/// `AdminHubError::Internal` if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(|e| AdminHubError::Internal(format!("Failed to install tracing subscriber: {e}")))
}
