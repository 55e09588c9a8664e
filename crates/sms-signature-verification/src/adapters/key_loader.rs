//! # Public Key Loader
//!
//! Decodes the verifier's RSA public key from PEM.
//!
//! Accepted framings:
//! - `-----BEGIN PUBLIC KEY-----` (SubjectPublicKeyInfo, what `openssl rsa -pubout` writes)
//! - `-----BEGIN RSA PUBLIC KEY-----` (PKCS#1)
//!
//! Loading happens once at startup. A failure here is fatal to the process:
//! a verifier without a key cannot answer anything truthfully.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::RsaPublicKey;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that prevent the public key from being loaded.
#[derive(Debug, Error)]
pub enum KeyLoadError {
    #[error("failed to read public key file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid RSA public key PEM: {0}")]
    Pem(String),

    #[error("failed to encode public key: {0}")]
    Encode(String),
}

/// Decode an RSA public key from SPKI or PKCS#1 PEM text.
pub fn parse_public_key_pem(pem: &str) -> Result<RsaPublicKey, KeyLoadError> {
    let pem = pem.trim();
    match RsaPublicKey::from_public_key_pem(pem) {
        Ok(key) => Ok(key),
        Err(spki_err) => RsaPublicKey::from_pkcs1_pem(pem).map_err(|pkcs1_err| {
            KeyLoadError::Pem(format!("not SPKI ({spki_err}) nor PKCS#1 ({pkcs1_err})"))
        }),
    }
}

/// Read and decode the PEM file at `path`.
pub fn load_public_key_pem(path: impl AsRef<Path>) -> Result<RsaPublicKey, KeyLoadError> {
    let path = path.as_ref();
    let pem = fs::read_to_string(path).map_err(|source| KeyLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "Read public key file");
    parse_public_key_pem(&pem)
}

/// Base64 SHA-256 of the key's SubjectPublicKeyInfo DER.
///
/// Logged at startup so operators can confirm which key is loaded without
/// printing the key itself.
pub fn public_key_fingerprint(key: &RsaPublicKey) -> Result<String, KeyLoadError> {
    let der = key
        .to_public_key_der()
        .map_err(|e| KeyLoadError::Encode(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(der.as_bytes());
    Ok(STANDARD.encode(hasher.finalize()))
}
