//! # SMS Verification Service
//!
//! Application service layer that implements the `SmsVerificationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SmsVerificationApi`)
//! - Delegates the cryptographic check to the domain verifier
//! - Owns the per-request logging

use crate::domain::entities::VerificationOutcome;
use crate::domain::verifier::RsaSignatureVerifier;
use crate::ports::inbound::SmsVerificationApi;
use shared_types::SmsRequest;
use tracing::{info, warn};

/// SMS Verification Service.
///
/// Holds the verifier built from the process-wide public key. Cheap to share
/// behind an `Arc`; every method takes `&self`.
#[derive(Debug, Clone)]
pub struct SmsVerificationService {
    verifier: RsaSignatureVerifier,
}

impl SmsVerificationService {
    pub fn new(verifier: RsaSignatureVerifier) -> Self {
        Self { verifier }
    }

    pub fn verifier(&self) -> &RsaSignatureVerifier {
        &self.verifier
    }
}

impl SmsVerificationApi for SmsVerificationService {
    fn verify_request(&self, request: &SmsRequest) -> VerificationOutcome {
        let outcome = self.verifier.verify(request);

        if outcome.verified() {
            info!(message_id = %outcome.message_id(), "Signature verified");
        } else {
            warn!(
                message_id = %outcome.message_id(),
                status = %outcome.status(),
                detail = %outcome.status_message(),
                "Signature rejected"
            );
        }

        outcome
    }
}
