//! Response cache with per-entry TTL
//!
//! Keyed by request fingerprint. Expiry is lazy: a read past the TTL behaves
//! as absent and removes the stale entry. Writes are first-writer-wins: a
//! fresh entry is never overwritten by a later concurrent success for the
//! same key, so a second completion cannot reset a fresher expiry.

use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool {
        self.expires_at > Instant::now()
    }
}

/// TTL cache for successful response payloads
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Get the cached value for a fingerprint, removing it when stale.
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh() {
                return Some(entry.value.clone());
            }
            drop(entry);
            log::debug!("Cache entry for {key} expired, removing");
            self.entries.remove(key);
        }
        None
    }

    /// Whether a fresh entry exists for the fingerprint.
    pub fn has(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| entry.is_fresh())
            .unwrap_or(false)
    }

    /// Store a value, first-writer-wins: an existing fresh entry is kept
    /// untouched and the write becomes a no-op. An expired entry counts as
    /// absent and is replaced.
    pub fn store(&self, key: &str, value: Value, ttl: Duration) {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_fresh() {
                    log::debug!("Cache entry for {key} already present, skipping write");
                    return;
                }
                occupied.insert(CacheEntry {
                    value,
                    expires_at: Instant::now() + ttl,
                });
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry {
                    value,
                    expires_at: Instant::now() + ttl,
                });
            }
        }
    }

    /// Drop every expired entry. Expiry is otherwise lazy, so this is only
    /// needed by long-lived processes that want to bound memory proactively.
    pub fn purge_expired(&self) {
        self.entries.retain(|_, entry| entry.is_fresh());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
