//! # RSA Signature Verifier
//!
//! Pure domain logic for verifying a signed SMS payload.
//!
//! ## Algorithm
//!
//! 1. No payload → `MISSING_PAYLOAD` (identifier `"unknown"`)
//! 2. Empty signature → `MISSING_SIGNATURE`
//! 3. `digest = SHA-256(canonical_bytes(payload))`
//! 4. Decode the base64 signature
//! 5. RSASSA-PKCS1-v1_5 / SHA-256 verification of `digest` (not of the
//!    canonical bytes: the signer hashes first, then signs the digest with
//!    `SHA256withRSA`, so the digest is hashed again inside the scheme)
//! 6. Match → `VALID`, mismatch → `INVALID_SIGNATURE`,
//!    decode failure → `VERIFICATION_ERROR`
//!
//! `verify` returns a `VerificationOutcome` rather than a `Result`: no failure
//! can escape it.

use super::canonical::canonical_digest;
use super::entities::VerificationOutcome;
use super::errors::SignatureError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use sha2::Sha256;
use shared_types::{SmsPayload, SmsRequest};

/// Verifies signed SMS requests against one immutable RSA public key.
///
/// Construct once at startup and share (`Arc`) across requests; it holds no
/// mutable state, so concurrent use needs no locking.
#[derive(Debug, Clone)]
pub struct RsaSignatureVerifier {
    public_key: RsaPublicKey,
    verifying_key: VerifyingKey<Sha256>,
}

impl RsaSignatureVerifier {
    /// Create a verifier bound to `public_key`.
    pub fn new(public_key: RsaPublicKey) -> Self {
        let verifying_key = VerifyingKey::<Sha256>::new(public_key.clone());
        Self {
            public_key,
            verifying_key,
        }
    }

    /// The key this verifier checks against.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Modulus size in bits.
    pub fn key_bits(&self) -> usize {
        self.public_key.size() * 8
    }

    /// Verify a signed request.
    pub fn verify(&self, request: &SmsRequest) -> VerificationOutcome {
        let Some(payload) = request.payload.as_ref() else {
            return VerificationOutcome::missing_payload();
        };
        let message_id = payload.message_id.as_str();

        if request.message_signature.is_empty() {
            return VerificationOutcome::missing_signature(message_id);
        }

        match self.check_signature(payload, &request.message_signature) {
            Ok(()) => VerificationOutcome::valid(message_id),
            Err(SignatureError::Mismatch) => VerificationOutcome::invalid_signature(message_id),
            Err(e) => VerificationOutcome::error(message_id, e),
        }
    }

    /// Check `signature_b64` against the payload's canonical digest.
    pub fn check_signature(
        &self,
        payload: &SmsPayload,
        signature_b64: &str,
    ) -> Result<(), SignatureError> {
        let digest = canonical_digest(payload);
        let raw = STANDARD.decode(signature_b64)?;

        let signature = Signature::try_from(raw.as_slice())
            .map_err(|e| SignatureError::Malformed(e.to_string()))?;

        self.verifying_key
            .verify(&digest, &signature)
            .map_err(|_| SignatureError::Mismatch)
    }
}
