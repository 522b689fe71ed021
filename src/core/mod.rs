//! Core abstractions for reqflow
//!
//! This module provides the foundational types and utilities shared by the
//! rest of the crate: the unified error type, request fingerprinting, and the
//! logical request model.

pub mod error;
pub mod fingerprint;
pub mod request;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use error::{ClientError, ClientResult};
pub use fingerprint::fingerprint;
pub use request::{CallOptions, LogicalRequest};
