//! Route table for the verification API.
//!
//! All routes live under [`BASE_PATH`]:
//!
//! | Method | Path             | Handler                       |
//! |--------|------------------|-------------------------------|
//! | POST   | `/verify`        | [`handlers::verify`]          |
//! | POST   | `/verify/simple` | [`handlers::verify_simple`]   |
//! | POST   | `/verify/bulk`   | [`handlers::verify_bulk`]     |
//! | GET    | `/health`        | [`handlers::health`]          |
//! | GET    | `/info`          | [`handlers::info`]            |

use crate::handlers;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use sms_signature_verification::SmsVerificationApi;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Prefix shared by every route.
pub const BASE_PATH: &str = "/api/v1/sms";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn SmsVerificationApi>,
    /// Per-line cap for the bulk NDJSON endpoint
    pub max_line_bytes: usize,
}

impl AppState {
    pub fn new(service: Arc<dyn SmsVerificationApi>, max_line_bytes: usize) -> Self {
        Self {
            service,
            max_line_bytes,
        }
    }
}

/// Build the HTTP router.
///
/// `max_request_size` bounds buffered bodies (the unary endpoints); the bulk
/// endpoint streams its body and is bounded per line instead.
pub fn build_router(state: AppState, max_request_size: usize) -> Router {
    let api = Router::new()
        .route("/verify", post(handlers::verify))
        .route("/verify/simple", post(handlers::verify_simple))
        .route("/verify/bulk", post(handlers::verify_bulk))
        .route("/health", get(handlers::health))
        .route("/info", get(handlers::info))
        .layer(DefaultBodyLimit::max(max_request_size))
        .with_state(state);

    Router::new()
        .nest(BASE_PATH, api)
        .layer(TraceLayer::new_for_http())
}
