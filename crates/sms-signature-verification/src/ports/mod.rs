//! # Ports Layer
//!
//! The inbound API transports drive. The verifier has no outbound
//! dependencies: the public key is injected at construction.

pub mod inbound;
