//! Logical request model
//!
//! A `LogicalRequest` is the resolved, pre-dispatch form of one call attempt:
//! the endpoint lookup has already happened, but no transport rewriting has.
//! It is ephemeral and scoped to a single attempt.

use std::collections::HashMap;
use std::time::Duration;

use http::Method;
use serde_json::Value;

/// Per-call options, merged from endpoint defaults and caller overrides.
#[derive(Debug, Clone)]
pub struct CallOptions {
    /// Request payload, serialized into the fingerprint and the dispatch body
    pub payload: Value,

    /// Extra headers merged over the configured defaults
    pub headers: HashMap<String, String>,

    /// Whether this call holds the shared loading indicator open
    pub show_visibility: bool,

    /// Drop this call silently if an identical one is already in flight
    pub suppress_duplicates: bool,

    /// Cache the successful payload for this long; `None` disables caching
    pub cache_ttl: Option<Duration>,

    /// Show a user-facing toast when the call fails
    pub show_error_toast: bool,

    /// Override the default toast duration
    pub toast_duration: Option<Duration>,

    /// Override the default loading indicator message
    pub visibility_message: Option<String>,

    /// Whether the loading indicator should mask the UI underneath
    pub mask: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            payload: Value::Null,
            headers: HashMap::new(),
            show_visibility: true,
            suppress_duplicates: false,
            cache_ttl: None,
            show_error_toast: true,
            toast_duration: None,
            visibility_message: None,
            mask: false,
        }
    }
}

impl CallOptions {
    /// Convenience constructor for the common payload-only case
    pub fn with_payload(payload: Value) -> Self {
        Self {
            payload,
            ..Self::default()
        }
    }
}

/// One resolved call attempt.
#[derive(Debug, Clone)]
pub struct LogicalRequest {
    /// Logical call name as supplied by the caller (including any path suffix)
    pub name: String,

    /// HTTP method from the endpoint descriptor
    pub method: Method,

    /// Canonical pre-rewrite target path. Fingerprinting depends on this
    /// staying stable; base-URL splicing happens later, at assembly time.
    pub target: String,

    /// Effective options after merging endpoint defaults
    pub options: CallOptions,
}

impl LogicalRequest {
    /// Short one-line description for diagnostics
    pub fn describe(&self) -> String {
        format!("{} {} (name={})", self.method, self.target, self.name)
    }
}
