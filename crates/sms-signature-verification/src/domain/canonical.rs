//! # Canonical Encoding
//!
//! The byte sequence signer and verifier must agree on bit for bit.
//!
//! The canonical form of a payload is its proto3 binary encoding: fields in
//! ascending field-number order, default-valued scalars omitted. This is what
//! the signer's protobuf runtime emits, so it is reproduced with `prost`
//! rather than any text format whose field order or whitespace could drift.

use prost::Message;
use sha2::{Digest, Sha256};
use shared_types::SmsPayload;

/// SHA-256 digest of a canonical payload.
pub type PayloadDigest = [u8; 32];

/// Encode a payload to its canonical bytes.
pub fn canonical_bytes(payload: &SmsPayload) -> Vec<u8> {
    payload.encode_to_vec()
}

/// SHA-256 of the canonical bytes.
pub fn canonical_digest(payload: &SmsPayload) -> PayloadDigest {
    let mut hasher = Sha256::new();
    hasher.update(canonical_bytes(payload));
    let result = hasher.finalize();

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}
