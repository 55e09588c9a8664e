//! # Node Configuration
//!
//! Unified configuration for the gateway, key supply and logging.
//!
//! Every value has a default; environment variables override them:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SV_HTTP_HOST` | `0.0.0.0` |
//! | `SV_HTTP_PORT` | `8081` |
//! | `SV_PUBLIC_KEY_PATH` | `keys/public_key.pem` |
//! | `SV_MAX_REQUEST_SIZE` | `10485760` |
//! | `SV_MAX_LINE_BYTES` | `1048576` |
//! | `SV_LOG_LEVEL` or `RUST_LOG` | `info` |
//! | `SV_JSON_LOGS` | `false` |
//!
//! An override that does not parse keeps the default and is listed in
//! [`NodeConfig::invalid_overrides`]. It is reported with `warn!` once logging
//! is up, since the subscriber itself is configured from this struct.

use sms_api_gateway::{ConfigError as GatewayConfigError, GatewayConfig};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// HTTP gateway configuration.
    pub gateway: GatewayConfig,
    /// Public key supply.
    pub keys: KeyConfig,
    /// Logging configuration.
    pub logging: LogConfig,
    /// Overrides that failed to parse and were ignored.
    pub invalid_overrides: Vec<InvalidOverride>,
}

impl NodeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let mut invalid = Vec::new();

        override_parsed(&lookup, "SV_HTTP_HOST", &mut config.gateway.host, &mut invalid);
        override_parsed(&lookup, "SV_HTTP_PORT", &mut config.gateway.port, &mut invalid);
        override_parsed(
            &lookup,
            "SV_MAX_REQUEST_SIZE",
            &mut config.gateway.max_request_size,
            &mut invalid,
        );
        override_parsed(
            &lookup,
            "SV_MAX_LINE_BYTES",
            &mut config.gateway.max_line_bytes,
            &mut invalid,
        );

        if let Some(path) = lookup("SV_PUBLIC_KEY_PATH") {
            config.keys.public_key_path = PathBuf::from(path);
        }

        config.logging = LogConfig::from_lookup(&lookup);
        config.invalid_overrides = invalid;
        config
    }

    /// Validate configuration before startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;

        if self.keys.public_key_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyKeyPath);
        }

        Ok(())
    }
}

/// Public key supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConfig {
    /// PEM file holding the signer's RSA public key.
    pub public_key_path: PathBuf,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            public_key_path: PathBuf::from("keys/public_key.pem"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive (trace, debug, info, warn, error or per-target).
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Read `SV_LOG_LEVEL` (falling back to `RUST_LOG`) and `SV_JSON_LOGS`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            level: lookup("SV_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.level),
            json: lookup("SV_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json),
        }
    }
}

/// An environment override whose value did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOverride {
    pub variable: &'static str,
    pub value: String,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Gateway(#[from] GatewayConfigError),

    #[error("public key path is empty; set SV_PUBLIC_KEY_PATH")]
    EmptyKeyPath,
}

fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    variable: &'static str,
    target: &mut T,
    invalid: &mut Vec<InvalidOverride>,
) {
    let Some(raw) = lookup(variable) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => invalid.push(InvalidOverride {
            variable,
            value: raw,
        }),
    }
}
