//! Request fingerprinting
//!
//! Derives a stable identity for a logical request from its method, canonical
//! target and serialized payload. The fingerprint is the dedup and cache key,
//! so it must be computed from the target *before* any transport rewriting
//! (base URL splicing) to stay stable across duplicates.

use http::Method;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Compute the fingerprint for a logical request.
///
/// Payload serialization is deterministic: `serde_json` keeps object keys in
/// a sorted map, so two structurally equal payloads serialize identically.
/// This function never fails; every degraded mode still yields a usable key.
pub fn fingerprint(method: &Method, target: &str, payload: &Value) -> String {
    let serialized = serialize_payload(payload);
    let composed = format!("{method}|{target}|{serialized}");
    hash(&composed)
}

/// Serialize the payload for fingerprinting.
///
/// Falls back to the payload's display form when serialization fails. The
/// fallback is collision-prone but still a valid dedup/cache key, which beats
/// failing the whole call over an identity computation.
fn serialize_payload(payload: &Value) -> String {
    match serde_json::to_string(payload) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("Payload serialization for fingerprint failed, using display form: {e}");
            payload.to_string()
        }
    }
}

fn hash(composed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(composed.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
