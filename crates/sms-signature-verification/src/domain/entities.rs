//! # Domain Entities
//!
//! The outcome of one verification and the summary of a bulk session.
//!
//! Both types keep their fields private so their invariants hold by
//! construction:
//! - `VerificationOutcome`: `verified` is true iff `status` is `VALID`.
//! - `BulkSummary`: `total_processed == verified + failed` and one failed id
//!   per failure, in arrival order.

use chrono::Utc;
use serde::Serialize;
use shared_types::{VerificationStatus, UNKNOWN_MESSAGE_ID};
use std::fmt;

/// Result of verifying a single signed message.
///
/// Serializes to the gateway's response shape:
/// `{messageId, verified, status, statusMessage, verifiedAt}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    message_id: String,
    verified: bool,
    status: VerificationStatus,
    status_message: String,
    verified_at: i64,
}

impl VerificationOutcome {
    /// Build an outcome stamped with the current wall-clock time.
    pub fn new(
        message_id: impl Into<String>,
        status: VerificationStatus,
        status_message: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            verified: status.is_success(),
            status,
            status_message: status_message.into(),
            verified_at: Utc::now().timestamp_millis(),
        }
    }

    /// The signature matched.
    pub fn valid(message_id: impl Into<String>) -> Self {
        Self::new(message_id, VerificationStatus::Valid, "Signature is valid")
    }

    /// The signature decoded but did not match.
    pub fn invalid_signature(message_id: impl Into<String>) -> Self {
        Self::new(
            message_id,
            VerificationStatus::InvalidSignature,
            "Signature is invalid",
        )
    }

    /// No signature, or an empty one.
    pub fn missing_signature(message_id: impl Into<String>) -> Self {
        Self::new(
            message_id,
            VerificationStatus::MissingSignature,
            "Signature is missing or empty",
        )
    }

    /// No payload; the identifier falls back to [`UNKNOWN_MESSAGE_ID`].
    pub fn missing_payload() -> Self {
        Self::new(
            UNKNOWN_MESSAGE_ID,
            VerificationStatus::MissingPayload,
            "Payload is missing",
        )
    }

    /// Verification could not be carried out.
    pub fn error(message_id: impl Into<String>, diagnostic: impl fmt::Display) -> Self {
        Self::new(
            message_id,
            VerificationStatus::VerificationError,
            format!("Verification error: {diagnostic}"),
        )
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    /// Human-readable diagnostic.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Wall-clock time the outcome was produced, epoch milliseconds.
    pub fn verified_at(&self) -> i64 {
        self.verified_at
    }
}

/// Longest failed-message identifier a [`BulkSummary`] keeps, in bytes.
///
/// Longer identifiers are cut at the last char boundary within the limit, so a
/// summary costs a bounded amount per failed message however long the
/// submitted ids are.
pub const MAX_RECORDED_ID_BYTES: usize = 256;

/// Aggregate result of a bulk verification session.
///
/// Serializes as `{totalProcessed, verified, failed, failedMessageIds}`.
/// One identifier is kept per failure, so memory grows with the failure count
/// of the stream (at most [`MAX_RECORDED_ID_BYTES`] each).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSummary {
    total_processed: u64,
    #[serde(rename = "verified")]
    verified_count: u64,
    #[serde(rename = "failed")]
    failed_count: u64,
    failed_message_ids: Vec<String>,
}

impl BulkSummary {
    pub(crate) fn record_verified(&mut self) {
        self.total_processed += 1;
        self.verified_count += 1;
    }

    pub(crate) fn record_failed(&mut self, message_id: &str) {
        self.total_processed += 1;
        self.failed_count += 1;
        self.failed_message_ids
            .push(truncate_id(message_id, MAX_RECORDED_ID_BYTES).to_string());
    }

    pub fn total_processed(&self) -> u64 {
        self.total_processed
    }

    pub fn verified_count(&self) -> u64 {
        self.verified_count
    }

    pub fn failed_count(&self) -> u64 {
        self.failed_count
    }

    /// Identifiers of failed messages, in arrival order.
    pub fn failed_message_ids(&self) -> &[String] {
        &self.failed_message_ids
    }

    /// True when no message failed (vacuously true for an empty session).
    pub fn all_verified(&self) -> bool {
        self.failed_count == 0
    }
}

fn truncate_id(id: &str, max: usize) -> &str {
    if id.len() <= max {
        return id;
    }
    let mut end = max;
    while !id.is_char_boundary(end) {
        end -= 1;
    }
    &id[..end]
}
