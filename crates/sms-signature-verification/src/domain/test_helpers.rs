//! Test fixtures: fixed RSA keys and a signer matching the production scheme.
//!
//! Keys are loaded from `testdata/` once per test binary; generating 2048-bit
//! keys at test time is slow in debug builds.

use super::canonical::canonical_digest;
use super::verifier::RsaSignatureVerifier;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::signature::{SignatureEncoding, Signer};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use shared_types::{SmsPayload, SmsRequest};
use std::sync::OnceLock;

pub const SIGNER_PRIVATE_KEY_PEM: &str = include_str!("../../testdata/signer_private_key.pem");
pub const SIGNER_PUBLIC_KEY_PEM: &str = include_str!("../../testdata/signer_public_key.pem");
pub const SIGNER_PUBLIC_KEY_PKCS1_PEM: &str =
    include_str!("../../testdata/signer_public_key_pkcs1.pem");
pub const OTHER_PUBLIC_KEY_PEM: &str = include_str!("../../testdata/other_public_key.pem");

/// `openssl dgst -sha256 -sign signer_private_key.pem` over SHA-256 of the
/// canonical bytes of [`msg_1_payload`].
pub const OPENSSL_MSG_1_SIGNATURE: &str = "MiP73a2R+J8ZtvxPeTk7OlIEuqmyZwimTzcOTFLkor9r2SaW7xn0Pa+317UHQJqJ3+D6WHq3raf9OYWQaERZyiK4yRsujMvlJpv3tZvONASaGCPjGBYTv8Y7igUskOpMi6U7s1u55vKCnEkwxNDwbrpWwPqaWynE97WAxB17q6Kwc4JyhdSw30E5Un9RcLiNVaCVu5gTqP1GhRLWmM/efLq8g9M6B2nAL7MddZjcwfyi9JLPr+3AmIaQ47jl9nBguraPByd7z6lfyIPlJtx8mm23xJZG4GE16uD1FveSGNr5ulsV9CGxqBLWA7bXe+sFaMcYmxnJQRdkqpo4YyyFKA==";

/// As [`OPENSSL_MSG_1_SIGNATURE`] with `timestamp = 1_700_000_000_000`.
pub const OPENSSL_MSG_1_TS_SIGNATURE: &str = "nEhQOjM582RxY5brDr0CdKVNOLqKjdnidMgVQ5s573wxlRX6G55BYv7eh/JhzMXu+c7u2laQY0VP2c7uaZ+SqVxXYSqixa4EJGC4wo6eaFnzbKhfJ8PC9oJwTUQyVrN26fk+C2AmHqHmFrnTLzEv8jjR8yO+Bvhrc0ceYDnYO32lfjSasAh9KEspCSnuZhomHFQRSD80aQPmpG4S26ow7Cnf/kNS1Z3/TFMrfKpF0sC04q5zBkO3+miEa+leQc+K8CKxrXkzxBZgWccFxQ4JxzsQoXqq2u7O5yNHnzZt+Gtf1E84T30s2KHeQoUIAPjlrumZ5a7sbiFnPNAtvEHdXg==";

/// `{messageId:"msg-1", sender:"+1", recipient:"+2", content:"hi"}`
pub fn msg_1_payload() -> SmsPayload {
    SmsPayload {
        message_id: "msg-1".into(),
        sender: "+1".into(),
        recipient: "+2".into(),
        content: "hi".into(),
        timestamp: 0,
    }
}

pub fn payload_with_id(message_id: &str) -> SmsPayload {
    SmsPayload {
        message_id: message_id.into(),
        ..msg_1_payload()
    }
}

pub fn signer_private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::from_pkcs8_pem(SIGNER_PRIVATE_KEY_PEM).unwrap())
}

pub fn signer_public_key() -> RsaPublicKey {
    RsaPublicKey::from_public_key_pem(SIGNER_PUBLIC_KEY_PEM).unwrap()
}

pub fn signer_signing_key() -> SigningKey<Sha256> {
    SigningKey::<Sha256>::new(signer_private_key().clone())
}

/// Sign the way the upstream platform does: `SHA256withRSA(SHA-256(canonical))`.
pub fn sign_payload(payload: &SmsPayload) -> String {
    let digest = canonical_digest(payload);
    let signature = signer_signing_key().sign(&digest);
    STANDARD.encode(signature.to_bytes())
}

pub fn signed_request(payload: SmsPayload) -> SmsRequest {
    let signature = sign_payload(&payload);
    SmsRequest::new(payload, signature)
}

pub fn signer_verifier() -> RsaSignatureVerifier {
    RsaSignatureVerifier::new(signer_public_key())
}

pub fn other_verifier() -> RsaSignatureVerifier {
    RsaSignatureVerifier::new(RsaPublicKey::from_public_key_pem(OTHER_PUBLIC_KEY_PEM).unwrap())
}
