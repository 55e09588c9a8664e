//! Domain types for the HTTP gateway: configuration, errors and response bodies.

pub mod config;
pub mod error;
pub mod types;
