//! # Error Types
//!
//! Errors for the shared vocabulary.

use thiserror::Error;

/// A string that is not one of the wire status names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown verification status: {0}")]
pub struct ParseStatusError(pub String);
