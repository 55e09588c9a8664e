//! Logging setup: `tracing-subscriber` with an `EnvFilter` and optional JSON
//! output for containers.

use crate::config::LogConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directive}': {reason}")]
    Filter { directive: String, reason: String },

    #[error("failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Build the filter for `config.level`.
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::Filter {
        directive: config.level.clone(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_target(true)
        .with_thread_ids(true);

    let installed = if config.json {
        builder
            .json()
            .with_file(true)
            .with_line_number(true)
            .try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| TelemetryError::Init(e.to_string()))
}
