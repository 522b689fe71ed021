//! Collaborator and extension-point traits
//!
//! The orchestrator talks to its UI collaborators (loading indicator, toast)
//! and its extension points (pre-dispatch, post-completion, failure handling)
//! through injected strategy objects supplied at construction. No-op defaults
//! keep headless use and tests free of ceremony.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::LogicalRequest;
use crate::outcome::{RequestFailure, SendOutcome};
use crate::transport::TransportResponse;

/// Loading indicator collaborator.
///
/// `engage`/`disengage` must be idempotent. The `activity` pulse is the
/// secondary always-on signal: it follows the whole in-flight set, so some
/// indication reaches the user even when every outstanding call suppressed
/// the primary indicator.
pub trait VisibilitySink: Send + Sync {
    fn engage(&self, message: &str, mask: bool);
    fn disengage(&self);
    fn activity(&self, active: bool);
}

/// Transient user-facing notification collaborator.
pub trait ToastSink: Send + Sync {
    fn show(&self, message: &str, duration: Option<Duration>);
}

/// Runs before the dedupe/cache/dispatch pipeline. Returning `Some` short-
/// circuits the whole pipeline with the hook's own outcome.
#[async_trait]
pub trait PreDispatchHook: Send + Sync {
    async fn before_dispatch(
        &self,
        request: &LogicalRequest,
    ) -> Option<Result<SendOutcome, RequestFailure>>;
}

/// Runs on the raw transport response before classification, e.g. for
/// response decryption.
#[async_trait]
pub trait PostCompletionHook: Send + Sync {
    async fn after_completion(
        &self,
        response: TransportResponse,
        request: &LogicalRequest,
    ) -> TransportResponse;
}

/// Status-specific failure handling, e.g. session-expiry redirects. Runs
/// inside the common failure funnel for every non-success classification.
#[async_trait]
pub trait FailureHook: Send + Sync {
    async fn on_failure(&self, status: i64, request: &LogicalRequest);
}

/// No-op collaborator set for headless use.
pub struct NoopSink;

impl VisibilitySink for NoopSink {
    fn engage(&self, _message: &str, _mask: bool) {}
    fn disengage(&self) {}
    fn activity(&self, _active: bool) {}
}

impl ToastSink for NoopSink {
    fn show(&self, _message: &str, _duration: Option<Duration>) {}
}
