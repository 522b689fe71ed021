//! In-flight request registry and visibility signal
//!
//! The registry is the coordination point for duplicate suppression and for
//! the shared loading indicator. Entries are created at dispatch time and
//! removed unconditionally at completion, on success and failure paths alike.
//!
//! The visibility signal is reference-counted through the registry contents
//! rather than a boolean: the primary indicator engages on the empty to
//! non-empty transition of the *visible* subset and disengages only when no
//! visibility-holding call remains, regardless of completion order. Calls
//! that declined visibility still occupy the registry for dedup but are
//! excluded from that test.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use http::Method;

use crate::hooks::VisibilitySink;

/// Snapshot of one outstanding call.
#[derive(Debug, Clone)]
pub struct InFlightEntry {
    pub call_id: String,
    pub method: Method,
    pub target: String,
    pub show_visibility: bool,
    pub started_at: Instant,
}

/// Registry of fingerprints with an outstanding call
pub struct InFlightRegistry {
    entries: DashMap<String, InFlightEntry>,
}

impl Default for InFlightRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn add(&self, fingerprint: String, entry: InFlightEntry) {
        log::debug!(
            "Marking in flight: {} {} fingerprint={fingerprint}",
            entry.method,
            entry.target
        );
        self.entries.insert(fingerprint, entry);
    }

    /// Idempotent removal. A missing key is logged, not escalated: the entry
    /// may have been overwritten by a duplicate-check path.
    pub fn remove(&self, fingerprint: &str) {
        if self.entries.remove(fingerprint).is_none() {
            log::warn!("In-flight entry for fingerprint {fingerprint} already gone");
        }
    }

    pub fn has(&self, fingerprint: &str) -> bool {
        self.entries.contains_key(fingerprint)
    }

    pub fn get(&self, fingerprint: &str) -> Option<InFlightEntry> {
        self.entries.get(fingerprint).map(|e| e.value().clone())
    }

    /// Whether any call is outstanding. With `exclude_no_visibility`, entries
    /// that declined the indicator are filtered out before testing emptiness.
    pub fn any(&self, exclude_no_visibility: bool) -> bool {
        if exclude_no_visibility {
            self.entries.iter().any(|e| e.value().show_visibility)
        } else {
            !self.entries.is_empty()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Drives the indicator collaborator from registry transitions.
///
/// `on_dispatch` must run before the registry insert and `on_complete` after
/// the registry removal, synchronously within the same completion turn; the
/// recompute must never be deferred past an await point or overlapping
/// completions could strand the indicator.
pub struct VisibilitySignal {
    sink: Arc<dyn VisibilitySink>,
    engaged: AtomicBool,
}

impl VisibilitySignal {
    pub fn new(sink: Arc<dyn VisibilitySink>) -> Self {
        Self {
            sink,
            engaged: AtomicBool::new(false),
        }
    }

    /// Called before inserting the new entry into the registry.
    pub fn on_dispatch(
        &self,
        registry: &InFlightRegistry,
        wants_visibility: bool,
        message: &str,
        mask: bool,
    ) {
        if registry.is_empty() {
            self.sink.activity(true);
        }
        if wants_visibility && !registry.any(true) {
            self.engaged.store(true, Ordering::SeqCst);
            self.sink.engage(message, mask);
        }
    }

    /// Called after removing the completed entry from the registry.
    pub fn on_complete(&self, registry: &InFlightRegistry) {
        if self.engaged.load(Ordering::SeqCst) && !registry.any(true) {
            self.engaged.store(false, Ordering::SeqCst);
            self.sink.disengage();
        }
        if registry.is_empty() {
            self.sink.activity(false);
        }
    }
}
