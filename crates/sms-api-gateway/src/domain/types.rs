//! Response bodies that are not domain entities.
//!
//! Single outcomes and bulk summaries serialize straight from
//! `VerificationOutcome` and `BulkSummary`.

use serde::Serialize;
use std::collections::BTreeMap;

/// Human-readable service name reported by `/health` and `/info`.
pub const SERVICE_NAME: &str = "SMS Verifier Service";

/// `POST /verify/simple`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleVerifyResponse {
    pub verified: bool,
    pub message_id: String,
    /// Response time, epoch milliseconds
    pub timestamp: i64,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// `GET /info`
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub service: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub capabilities: Vec<&'static str>,
    pub endpoints: BTreeMap<&'static str, String>,
}
