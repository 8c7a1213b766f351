//! Tracing subscriber bootstrap.
//!
//! `RUST_LOG` takes precedence over the configured level so operators can
//! raise verbosity for a single module without a restart flag.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    InvalidLevel(String),

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global fmt subscriber. Fails if one is already installed.
pub fn init_logging(level: &str) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},tower_http={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::InvalidLevel(other.to_string())),
    }
}
