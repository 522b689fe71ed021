//! Transport collaborator boundary
//!
//! The orchestrator never performs network I/O itself. It hands an assembled
//! request to a [`Transport`] implementation, which must produce exactly one
//! outcome per dispatch: a response (any status code) or a dispatch error
//! when the transport could not be invoked at all.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use serde_json::Value;

/// Fully assembled request parameters handed to the transport.
///
/// `url` is the post-rewrite form (base URL already spliced in); the
/// pre-rewrite target only exists on the logical request, where the
/// fingerprint is computed from it.
#[derive(Debug, Clone)]
pub struct AssembledRequest {
    /// Correlation id carried through the diagnostic logs
    pub call_id: String,
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub payload: Value,
    pub timeout: Option<Duration>,
}

/// Raw completed response from the transport, any status code.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl TransportResponse {
    /// Minimal response with just a status code and body, for tests and
    /// transports that do not surface headers.
    pub fn new(status_code: u16, body: Value) -> Self {
        Self {
            status_code,
            headers: HashMap::new(),
            body,
        }
    }
}

/// The transport could not be invoked (malformed request, no connectivity,
/// timeout before any status line). Distinct from a completed response with
/// a failure status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    pub err_msg: String,
}

impl DispatchError {
    pub fn new(err_msg: impl Into<String>) -> Self {
        Self {
            err_msg: err_msg.into(),
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transport dispatch failed: {}", self.err_msg)
    }
}

impl std::error::Error for DispatchError {}

/// Contract: invoked once per dispatch, resolves exactly once, asynchronously.
/// Socket-level concerns (TLS, retries, pooling) live behind this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn dispatch(
        &self,
        request: &AssembledRequest,
    ) -> Result<TransportResponse, DispatchError>;
}
