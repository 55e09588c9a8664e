//! SMS API Gateway - HTTP interface for signature verification.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              SMS API GATEWAY                 │
//! ├──────────────────────────────────────────────┤
//! │  TraceLayer → DefaultBodyLimit → handlers    │
//! │                      │                       │
//! │        Arc<dyn SmsVerificationApi>           │
//! └──────────────────────┼───────────────────────┘
//!                        ▼
//!            sms-signature-verification
//! ```
//!
//! The gateway holds no verification logic of its own. Unary requests are
//! answered with 200 (verified) or 401 (any other status); bulk requests are
//! NDJSON bodies folded into one summary.
//!
//! # Usage
//!
//! ```ignore
//! use sms_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let gateway = ApiGatewayService::new(GatewayConfig::default(), service)?;
//! gateway.run(shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::{ConfigError, GatewayConfig};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use handlers::{status_code_for, VERSION};
pub use router::{build_router, AppState, BASE_PATH};
pub use service::ApiGatewayService;
