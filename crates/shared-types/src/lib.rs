//! # Shared Types Crate
//!
//! Types shared by the verification core, the HTTP gateway and the node
//! runtime.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `SmsPayload` field numbers define the
//!   canonical encoding the signer hashes. They are defined once, here.
//! - **Wire-Stable Vocabulary**: `VerificationStatus` names are part of the
//!   public contract and serialize verbatim (`VALID`, `INVALID_SIGNATURE`, ...).

pub mod entities;
pub mod errors;
pub mod status;

pub use entities::*;
pub use errors::*;
pub use status::*;
