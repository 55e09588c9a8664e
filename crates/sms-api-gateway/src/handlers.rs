//! HTTP handlers.
//!
//! Handlers own no verification logic: they decode the body, call the
//! `SmsVerificationApi` held in [`AppState`] and map the result to a status.

use crate::domain::error::{ApiError, ApiResult};
use crate::domain::types::{HealthResponse, InfoResponse, SimpleVerifyResponse, SERVICE_NAME};
use crate::router::{AppState, BASE_PATH};
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use shared_types::SmsRequest;
use sms_signature_verification::{verify_ndjson_stream, BulkSummary, VerificationOutcome};
use std::collections::BTreeMap;
use tracing::{error, info, warn};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP status for a unary outcome: 200 when verified, 401 otherwise.
pub fn status_code_for(outcome: &VerificationOutcome) -> StatusCode {
    if outcome.status().is_success() {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    }
}

/// `POST /verify`
pub async fn verify(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<VerificationOutcome>)> {
    info!("Received SMS signature verification request");

    let request = parse_request(&body)?;
    let outcome = state.service.verify_request(&request);

    info!(
        message_id = %outcome.message_id(),
        verified = outcome.verified(),
        status = %outcome.status(),
        "Verification result"
    );

    Ok((status_code_for(&outcome), Json(outcome)))
}

/// `POST /verify/simple`
pub async fn verify_simple(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SimpleVerifyResponse>> {
    info!("Received simple SMS verification request");

    let request = parse_request(&body)?;
    let verified = state.service.is_signature_valid(&request);

    Ok(Json(SimpleVerifyResponse {
        verified,
        message_id: request.message_id().to_string(),
        timestamp: Utc::now().timestamp_millis(),
    }))
}

/// `POST /verify/bulk`
///
/// The body is newline-delimited JSON, one `SmsRequest` per line, consumed as
/// it arrives. The summary is returned once the body ends.
pub async fn verify_bulk(
    State(state): State<AppState>,
    body: Body,
) -> ApiResult<Json<BulkSummary>> {
    info!("Bulk verification stream opened");

    let summary = verify_ndjson_stream(
        state.service.as_ref(),
        body.into_data_stream(),
        state.max_line_bytes,
    )
    .await
    .map_err(|e| {
        warn!(error = %e, "Bulk verification stream ended abnormally");
        ApiError::from(e)
    })?;

    Ok(Json(summary))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        service: SERVICE_NAME,
        version: VERSION,
    })
}

/// `GET /info`
pub async fn info() -> Json<InfoResponse> {
    let endpoints = [
        ("verify", "/verify"),
        ("simpleVerify", "/verify/simple"),
        ("bulkVerify", "/verify/bulk"),
        ("health", "/health"),
    ]
    .into_iter()
    .map(|(name, path)| (name, format!("{BASE_PATH}{path}")))
    .collect::<BTreeMap<_, _>>();

    Json(InfoResponse {
        service: SERVICE_NAME,
        description: "Digital signature verification for SMS/Notification platforms",
        version: VERSION,
        capabilities: vec!["signature-verification"],
        endpoints,
    })
}

fn parse_request(body: &[u8]) -> ApiResult<SmsRequest> {
    serde_json::from_slice(body).map_err(|e| {
        error!(error = %e, "Invalid request format");
        ApiError::invalid_request_format(e)
    })
}
