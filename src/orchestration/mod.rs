//! Request orchestration
//!
//! This module coordinates the full lifecycle of one logical call: name
//! resolution, fingerprinting, duplicate suppression, cache lookup, the
//! visibility signal, transport dispatch, teardown, outcome classification
//! and the common failure funnel.
//!
//! All shared state (in-flight registry, response cache, visibility signal)
//! is owned by one `RequestOrchestrator` instance; independent orchestrators
//! do not interfere, which keeps tests hermetic.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::cache::ResponseCache;
use crate::config::{Config, EndpointRegistry, RequestDefaults};
use crate::core::{fingerprint, CallOptions, ClientResult, LogicalRequest};
use crate::hooks::{
    FailureHook, NoopSink, PostCompletionHook, PreDispatchHook, ToastSink, VisibilitySink,
};
use crate::inflight::{InFlightEntry, InFlightRegistry, VisibilitySignal};
use crate::outcome::{
    classify_dispatch_error, classify_response, Classified, RequestFailure, SendOutcome,
};
use crate::transport::{AssembledRequest, Transport, TransportResponse};


/// Collaborators and extension points injected at construction
pub struct OrchestratorHooks {
    pub visibility_sink: Arc<dyn VisibilitySink>,
    pub toast_sink: Arc<dyn ToastSink>,
    pub pre_dispatch: Option<Arc<dyn PreDispatchHook>>,
    pub post_completion: Option<Arc<dyn PostCompletionHook>>,
    pub failure: Option<Arc<dyn FailureHook>>,
}

impl Default for OrchestratorHooks {
    fn default() -> Self {
        Self {
            visibility_sink: Arc::new(NoopSink),
            toast_sink: Arc::new(NoopSink),
            pre_dispatch: None,
            post_completion: None,
            failure: None,
        }
    }
}

/// Orchestrates every outgoing call: dedupe, cache, visibility, dispatch,
/// classification and the uniform failure path.
pub struct RequestOrchestrator {
    endpoints: EndpointRegistry,
    defaults: RequestDefaults,
    transport: Arc<dyn Transport>,
    hooks: OrchestratorHooks,
    inflight: InFlightRegistry,
    visibility: VisibilitySignal,
    cache: ResponseCache,
}

impl RequestOrchestrator {
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> ClientResult<Self> {
        Self::with_hooks(config, transport, OrchestratorHooks::default())
    }

    pub fn with_hooks(
        config: &Config,
        transport: Arc<dyn Transport>,
        hooks: OrchestratorHooks,
    ) -> ClientResult<Self> {
        let endpoints = EndpointRegistry::from_config(config)?;
        let visibility = VisibilitySignal::new(hooks.visibility_sink.clone());
        Ok(Self {
            endpoints,
            defaults: config.defaults.clone(),
            transport,
            hooks,
            inflight: InFlightRegistry::new(),
            visibility,
            cache: ResponseCache::new(),
        })
    }

    /// Endpoint registry, for runtime registration
    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    /// Response cache, for proactive purging by long-lived hosts
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Issue one logical call.
    ///
    /// Duplicate-suppression and cache decisions happen synchronously before
    /// the first await point, and registry removal plus visibility recompute
    /// happen synchronously after the transport completes. The only
    /// suspension in between is the dispatch itself, so overlapping calls
    /// cannot race the check-then-insert or the teardown.
    pub async fn send(
        &self,
        name: &str,
        options: CallOptions,
    ) -> Result<SendOutcome, RequestFailure> {
        let request = self.resolve(name, options);
        let fp = fingerprint(&request.method, &request.target, &request.options.payload);

        if let Some(hook) = &self.hooks.pre_dispatch {
            if let Some(outcome) = hook.before_dispatch(&request).await {
                log::debug!("Pre-dispatch hook short-circuited {}", request.describe());
                return outcome;
            }
        }

        if request.options.suppress_duplicates && self.inflight.has(&fp) {
            let competing = self
                .inflight
                .get(&fp)
                .map(|e| e.call_id)
                .unwrap_or_default();
            log::warn!(
                "Suppressing duplicate {} fingerprint={fp} in-flight call_id={competing}",
                request.describe()
            );
            return Ok(SendOutcome::Suppressed);
        }

        if let Some(cached) = self.cache.get(&fp) {
            log::debug!("Serving {} from cache fingerprint={fp}", request.describe());
            return Ok(SendOutcome::Resolved {
                data: cached,
                response: None,
            });
        }

        let call_id = Uuid::new_v4().to_string();
        let message = request
            .options
            .visibility_message
            .clone()
            .unwrap_or_else(|| self.defaults.visibility_message.clone());
        self.visibility.on_dispatch(
            &self.inflight,
            request.options.show_visibility,
            &message,
            request.options.mask,
        );
        self.inflight.add(
            fp.clone(),
            InFlightEntry {
                call_id: call_id.clone(),
                method: request.method.clone(),
                target: request.target.clone(),
                show_visibility: request.options.show_visibility,
                started_at: std::time::Instant::now(),
            },
        );

        let assembled = self.assemble(&request, &call_id);
        let dispatched = self.transport.dispatch(&assembled).await;

        // Unconditional teardown, same turn as completion: remove first, then
        // recompute visibility against what is still outstanding.
        self.inflight.remove(&fp);
        self.visibility.on_complete(&self.inflight);

        match dispatched {
            Err(err) => {
                log::debug!("Dispatch failed for call_id={call_id}: {err}");
                let fail = classify_dispatch_error(&err);
                Err(self.fail(fail.status, fail.to_value(), None, &request).await)
            }
            Ok(response) => {
                let response = match &self.hooks.post_completion {
                    Some(hook) => hook.after_completion(response, &request).await,
                    None => response,
                };

                match classify_response(&response) {
                    Classified::BusinessSuccess { data } => {
                        if let Some(ttl) = request.options.cache_ttl {
                            self.cache.store(&fp, data.clone(), ttl);
                        }
                        Ok(SendOutcome::Resolved {
                            data,
                            response: Some(response),
                        })
                    }
                    Classified::BusinessFailure { status, error } => Err(self
                        .fail(status, error, Some(response), &request)
                        .await),
                    Classified::TransportFailure(fail) => Err(self
                        .fail(fail.status, fail.to_value(), Some(response), &request)
                        .await),
                }
            }
        }
    }

    /// Resolve the logical name and merge endpoint defaults under the
    /// caller's options. The target captured here is pre-rewrite; the base
    /// URL is spliced in only at assembly time.
    fn resolve(&self, name: &str, mut options: CallOptions) -> LogicalRequest {
        let resolved = self.endpoints.resolve(name);
        options.cache_ttl = options.cache_ttl.or(resolved.cache_ttl);
        options.suppress_duplicates = options.suppress_duplicates || resolved.suppress_duplicates;
        LogicalRequest {
            name: name.to_string(),
            method: resolved.method,
            target: resolved.target,
            options,
        }
    }

    fn assemble(&self, request: &LogicalRequest, call_id: &str) -> AssembledRequest {
        let mut headers = self.defaults.headers.clone();
        headers.extend(request.options.headers.clone());
        AssembledRequest {
            call_id: call_id.to_string(),
            method: request.method.clone(),
            url: format!("{}{}", self.defaults.base_url, request.target),
            headers,
            payload: request.options.payload.clone(),
            timeout: self.defaults.timeout(),
        }
    }

    /// Common failure funnel: every non-success classification passes through
    /// here, so no failure path skips diagnostics, the user-facing toast or
    /// the status-specific hook.
    async fn fail(
        &self,
        status: i64,
        data: Value,
        response: Option<TransportResponse>,
        request: &LogicalRequest,
    ) -> RequestFailure {
        let failure = RequestFailure {
            status,
            data,
            response,
        };
        log::error!(
            "Request failed: {} status={status} payload={} error={}",
            request.describe(),
            request.options.payload,
            failure.data
        );

        if request.options.show_error_toast {
            let duration = request
                .options
                .toast_duration
                .unwrap_or_else(|| self.defaults.toast_duration());
            let message = format!("{} ({status})", failure.message());
            self.hooks.toast_sink.show(&message, Some(duration));
        }

        if let Some(hook) = &self.hooks.failure {
            hook.on_failure(status, request).await;
        }

        failure
    }
}
