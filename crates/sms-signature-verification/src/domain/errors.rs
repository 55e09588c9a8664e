//! # Verification Errors
//!
//! Error types for signature checking and bulk sessions.
//!
//! `SignatureError` never leaves the verifier: it is folded into a
//! `VerificationOutcome` before `verify` returns.

use shared_types::VerificationStatus;
use thiserror::Error;

/// Why a signature check did not succeed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The transport encoding of the signature is not valid base64.
    #[error("signature is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The decoded bytes cannot form an RSA signature value.
    #[error("malformed signature: {0}")]
    Malformed(String),

    /// The signature does not match the payload under the configured key.
    #[error("signature does not match payload")]
    Mismatch,
}

impl SignatureError {
    /// The status this failure is reported as.
    pub fn status(&self) -> VerificationStatus {
        match self {
            Self::Mismatch => VerificationStatus::InvalidSignature,
            Self::Encoding(_) | Self::Malformed(_) => VerificationStatus::VerificationError,
        }
    }
}

/// Misuse of a bulk session's lifecycle.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BulkSessionError {
    /// A message arrived after the session was completed.
    #[error("bulk session is closed")]
    Closed,

    /// `on_complete` was called a second time.
    #[error("bulk session summary was already emitted")]
    AlreadyCompleted,
}
