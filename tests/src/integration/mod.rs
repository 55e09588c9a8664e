//! Cross-crate flows: signer fixture → gateway → verifier → response.

pub mod flows;
