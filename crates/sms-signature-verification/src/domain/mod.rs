//! # Domain Layer
//!
//! Pure verification logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod bulk;
pub mod canonical;
pub mod entities;
pub mod errors;
pub mod verifier;

#[cfg(test)]
pub mod test_helpers;
