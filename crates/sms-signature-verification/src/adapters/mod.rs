//! # Adapters Module
//!
//! Infrastructure adapters around the domain:
//! - `key_loader`: PEM public key decoding at startup
//! - `stream`: drives a `BulkSession` from an async stream of requests or NDJSON bytes

pub mod key_loader;
pub mod stream;
