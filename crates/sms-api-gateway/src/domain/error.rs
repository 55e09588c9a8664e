//! Gateway error types and their HTTP rendering.
//!
//! Error bodies share one shape:
//! `{"error": CODE, "message": "...", "details"?: "...", "partial"?: {...}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use super::config::ConfigError;
use sms_signature_verification::{BulkStreamError, BulkSummary};
use std::fmt;
use std::io;
use std::net::SocketAddr;

/// Machine-readable error codes
pub mod codes {
    pub const INVALID_REQUEST_FORMAT: &str = "INVALID_REQUEST_FORMAT";
    pub const BULK_STREAM_ABORTED: &str = "BULK_STREAM_ABORTED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// API error returned by a handler
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    /// Error code
    #[serde(rename = "error")]
    pub code: &'static str,
    /// Error message
    pub message: String,
    /// Underlying cause, when it helps the caller fix the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Accounting for a bulk stream that ended abnormally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial: Option<BulkSummary>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
            partial: None,
        }
    }

    /// The request body is not a valid `SmsRequest`
    pub fn invalid_request_format(details: impl fmt::Display) -> Self {
        Self {
            details: Some(details.to_string()),
            ..Self::new(
                StatusCode::BAD_REQUEST,
                codes::INVALID_REQUEST_FORMAT,
                "Failed to parse SMS request",
            )
        }
    }

    /// The bulk stream ended before a clean end of body
    pub fn bulk_aborted(message: impl Into<String>, partial: Option<BulkSummary>) -> Self {
        Self {
            partial,
            ..Self::new(StatusCode::BAD_REQUEST, codes::BULK_STREAM_ABORTED, message)
        }
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL_ERROR,
            message,
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(&self)).into_response()
    }
}

impl From<BulkStreamError> for ApiError {
    fn from(err: BulkStreamError) -> Self {
        let message = err.to_string();
        match err {
            BulkStreamError::Aborted { partial, .. } => Self::bulk_aborted(message, Some(partial)),
            BulkStreamError::Session(_) => Self::internal(message),
        }
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway service errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Server failed while running
    #[error("server error")]
    Serve(#[source] io::Error),
}
