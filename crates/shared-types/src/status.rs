//! # Verification Status
//!
//! The status vocabulary shared by every transport. The serialized names are
//! wire-stable: clients match on them verbatim.

use crate::errors::ParseStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a single verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    /// Signature matches the payload under the configured public key.
    Valid,
    /// Signature decoded but does not match (tampering or wrong key).
    InvalidSignature,
    /// The request carried no signature, or an empty one.
    MissingSignature,
    /// The request carried no payload.
    MissingPayload,
    /// Verification could not be carried out (malformed encoding, runtime failure).
    VerificationError,
}

impl VerificationStatus {
    /// Every status, in declaration order.
    pub const ALL: [VerificationStatus; 5] = [
        Self::Valid,
        Self::InvalidSignature,
        Self::MissingSignature,
        Self::MissingPayload,
        Self::VerificationError,
    ];

    /// The wire name of this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::MissingSignature => "MISSING_SIGNATURE",
            Self::MissingPayload => "MISSING_PAYLOAD",
            Self::VerificationError => "VERIFICATION_ERROR",
        }
    }

    /// Whether a transport should report this status as success.
    ///
    /// Only `VALID` succeeds; every other status is a rejection.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Operational failures may be transient; all other rejections are final.
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::VerificationError)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
