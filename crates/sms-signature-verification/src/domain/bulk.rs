//! # Bulk Session
//!
//! Folds the outcomes of one client stream into a single [`BulkSummary`].
//!
//! ## Lifecycle
//!
//! ```text
//! OPEN ──on_message / on_undecodable / on_upstream_error──→ OPEN
//! OPEN ──on_complete──→ CLOSED (summary emitted exactly once)
//! ```
//!
//! ## Concurrency
//!
//! A session is driven by one stream and takes `&mut self` for every
//! transition, so the single-writer rule is enforced by the borrow checker:
//! `failed_message_ids` is in arrival order without any locking.
//!
//! ## Isolation
//!
//! One bad message never ends the session. A malformed frame, a rejected
//! signature or even a panic inside the verifier is counted as a failure and
//! the next message is processed normally.

use super::entities::{BulkSummary, VerificationOutcome};
use super::errors::BulkSessionError;
use crate::ports::inbound::SmsVerificationApi;
use shared_types::{SmsRequest, VerificationStatus, UNKNOWN_MESSAGE_ID};
use std::any::Any;
use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info, warn};

/// Lifecycle state of a [`BulkSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting messages.
    Open,
    /// Summary emitted; no further messages accepted.
    Closed,
}

/// Aggregating state machine for one bulk verification stream.
pub struct BulkSession<'a, S: SmsVerificationApi + ?Sized> {
    service: &'a S,
    state: SessionState,
    summary: BulkSummary,
    upstream_errors: Vec<String>,
}

impl<'a, S: SmsVerificationApi + ?Sized> BulkSession<'a, S> {
    /// Open a session that verifies through `service`.
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            state: SessionState::Open,
            summary: BulkSummary::default(),
            upstream_errors: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Running totals so far (the final summary once closed is returned by
    /// [`on_complete`](Self::on_complete)).
    pub fn summary(&self) -> &BulkSummary {
        &self.summary
    }

    /// Stream-level errors reported through [`on_upstream_error`](Self::on_upstream_error).
    pub fn upstream_errors(&self) -> &[String] {
        &self.upstream_errors
    }

    /// Verify one message and fold its outcome into the summary.
    ///
    /// Returns the message's status. Fails only if the session is closed, in
    /// which case nothing is counted.
    pub fn on_message(
        &mut self,
        request: &SmsRequest,
    ) -> Result<VerificationStatus, BulkSessionError> {
        self.ensure_open()?;

        let service = self.service;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| service.verify_request(request)))
            .unwrap_or_else(|payload| {
                let reason = panic_reason(payload.as_ref());
                error!(
                    message_id = %request.message_id(),
                    reason = %reason,
                    "Verification panicked, counting message as failed"
                );
                VerificationOutcome::error(request.message_id(), reason)
            });

        self.record(&outcome);
        Ok(outcome.status())
    }

    /// Count a frame that could not be decoded into a request.
    ///
    /// It is recorded as a failure under [`UNKNOWN_MESSAGE_ID`].
    pub fn on_undecodable(&mut self, reason: impl fmt::Display) -> Result<(), BulkSessionError> {
        self.ensure_open()?;

        warn!(reason = %reason, "Undecodable message in bulk stream");
        self.summary.record_failed(UNKNOWN_MESSAGE_ID);
        Ok(())
    }

    /// Record an error raised by the stream itself.
    ///
    /// Does not close the session or emit a summary; that stays the caller's
    /// decision.
    pub fn on_upstream_error(&mut self, err: &dyn fmt::Display) {
        error!(
            error = %err,
            processed = self.summary.total_processed(),
            "Error in bulk verification stream"
        );
        self.upstream_errors.push(err.to_string());
    }

    /// Close the session and emit its summary.
    ///
    /// The first call returns the summary; every later call returns
    /// [`BulkSessionError::AlreadyCompleted`] and counts nothing.
    pub fn on_complete(&mut self) -> Result<BulkSummary, BulkSessionError> {
        if self.state == SessionState::Closed {
            return Err(BulkSessionError::AlreadyCompleted);
        }
        self.state = SessionState::Closed;

        let summary = mem::take(&mut self.summary);
        info!(
            total = summary.total_processed(),
            verified = summary.verified_count(),
            failed = summary.failed_count(),
            "Bulk verification completed"
        );
        Ok(summary)
    }

    fn ensure_open(&self) -> Result<(), BulkSessionError> {
        match self.state {
            SessionState::Open => Ok(()),
            SessionState::Closed => Err(BulkSessionError::Closed),
        }
    }

    fn record(&mut self, outcome: &VerificationOutcome) {
        if outcome.verified() {
            debug!(message_id = %outcome.message_id(), "Bulk message verified");
            self.summary.record_verified();
        } else {
            warn!(
                message_id = %outcome.message_id(),
                status = %outcome.status(),
                "Bulk message failed verification"
            );
            self.summary.record_failed(outcome.message_id());
        }
    }
}

impl<S: SmsVerificationApi + ?Sized> fmt::Debug for BulkSession<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkSession")
            .field("state", &self.state)
            .field("summary", &self.summary)
            .field("upstream_errors", &self.upstream_errors)
            .finish_non_exhaustive()
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic during verification".to_string()
    }
}
