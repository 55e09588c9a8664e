//! # SMS Signature Verification
//!
//! Verifies the RSA-SHA256 signature a companion signer attaches to every SMS
//! payload, one message at a time or aggregated over a client stream.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): canonical encoding, the RSA verifier, the
//!   outcome vocabulary and the bulk session state machine. No I/O.
//! - **Ports Layer** (`ports/`): the `SmsVerificationApi` trait transports call.
//! - **Service Layer** (`service.rs`): wires the verifier to the port and logs.
//! - **Adapters** (`adapters/`): PEM key loading and the bulk stream driver.
//!
//! ## Verification pipeline
//!
//! ```text
//! SmsPayload ──protobuf──→ canonical bytes ──SHA-256──→ digest
//!                                                        │
//! messageSignature ──base64──→ raw bytes ──RSASSA-PKCS1-v1_5/SHA-256(digest)──→ outcome
//! ```
//!
//! ## Security Notes
//!
//! - The public key is injected once at construction and never mutated.
//! - No verification path panics or returns an error to the caller: every
//!   failure becomes a `VerificationOutcome`.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::key_loader::{
    load_public_key_pem, parse_public_key_pem, public_key_fingerprint, KeyLoadError,
};
pub use adapters::stream::{
    verify_ndjson_stream, verify_request_stream, BulkStreamError, DEFAULT_MAX_LINE_BYTES,
};
pub use domain::bulk::{BulkSession, SessionState};
pub use domain::canonical::{canonical_bytes, canonical_digest};
pub use domain::entities::{BulkSummary, VerificationOutcome, MAX_RECORDED_ID_BYTES};
pub use domain::errors::{BulkSessionError, SignatureError};
pub use domain::verifier::RsaSignatureVerifier;
pub use ports::inbound::SmsVerificationApi;
pub use service::SmsVerificationService;
pub use shared_types::{SmsPayload, SmsRequest, VerificationStatus, UNKNOWN_MESSAGE_ID};
