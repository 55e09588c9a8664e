//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use sms_signature_verification::DEFAULT_MAX_LINE_BYTES;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default HTTP port.
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default cap on unary request bodies (10 MiB).
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 10 * 1024 * 1024;

/// HTTP gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8081)
    pub port: u16,
    /// Maximum body size for the unary endpoints. Bulk bodies are streamed
    /// and bounded per line instead.
    pub max_request_size: usize,
    /// Maximum size of one NDJSON line on the bulk endpoint
    pub max_line_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: DEFAULT_HTTP_PORT,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }

        if self.max_line_bytes == 0 {
            return Err(ConfigError::InvalidLimit("max_line_bytes cannot be 0".into()));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Port 0 would bind an ephemeral port nobody can find
    #[error("invalid port: 0")]
    InvalidPort,
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}
