//! In-memory response cache with TTL expiry
//!
//! Stores successful read responses keyed by exact request path. An entry is
//! valid only while `now - stored_at < ttl` (60 seconds by default). Entries
//! are removed by write invalidation, never by size; unbounded growth is an
//! accepted gap of the original design.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

/// Default time-to-live for cached read responses
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// A single cached response payload
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The response payload
    value: Value,
    /// When the payload was stored
    stored_at: Instant,
}

/// Thread-safe map of request path to cached response payload.
///
/// All mutations happen on response-handling paths that run one at a time per
/// call, so a plain mutex-guarded map is sufficient; there is no cross-request
/// ordering guarantee.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates a cache with the default 60-second TTL
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with a custom TTL (used by tests to force expiry)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the payload stored under `key` if it is still fresh.
    ///
    /// Expired entries are removed on access.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `value` under `key` with a fresh timestamp, replacing any prior entry
    pub fn insert(&self, key: &str, value: &Value) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                stored_at: Instant::now(),
            },
        );
    }

    /// Removes every entry whose key contains `needle`, returning the count removed.
    ///
    /// Used by write invalidation: a successful mutation purges all cached reads
    /// that share the mutated resource's prefix.
    pub fn purge_containing(&self, needle: &str) -> usize {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let before = entries.len();
        entries.retain(|key, _| !key.contains(needle));
        before - entries.len()
    }

    /// Removes all entries
    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }

    /// Number of entries currently held, including any not yet expired-on-access
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    /// True if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let cache = ResponseCache::new();
        assert!(cache.get("/patients/").is_none());
    }

    #[test]
    fn test_insert_then_get_returns_same_payload() {
        let cache = ResponseCache::new();
        let payload = json!([{"patient_id": 1, "first_name": "Amina"}]);

        cache.insert("/patients/", &payload);

        assert_eq!(cache.get("/patients/"), Some(payload));
    }

    #[test]
    fn test_expired_entry_is_removed_on_access() {
        let cache = ResponseCache::with_ttl(Duration::from_millis(5));
        cache.insert("/patients/", &json!([]));

        std::thread::sleep(Duration::from_millis(10));

        assert!(cache.get("/patients/").is_none());
        assert_eq!(cache.len(), 0, "Expired entry should be dropped");
    }

    #[test]
    fn test_fresh_entry_survives_access() {
        let cache = ResponseCache::new();
        cache.insert("/doctors/", &json!([]));

        assert!(cache.get("/doctors/").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_purge_containing_removes_only_matching_keys() {
        let cache = ResponseCache::new();
        cache.insert("/patients/", &json!([]));
        cache.insert("/patients/4/", &json!({}));
        cache.insert("/doctors/", &json!([]));

        let removed = cache.purge_containing("/patients");

        assert_eq!(removed, 2);
        assert!(cache.get("/patients/").is_none());
        assert!(cache.get("/patients/4/").is_none());
        assert!(cache.get("/doctors/").is_some(), "Unrelated keys survive");
    }

    #[test]
    fn test_purge_containing_with_no_matches() {
        let cache = ResponseCache::new();
        cache.insert("/doctors/", &json!([]));

        assert_eq!(cache.purge_containing("/patients"), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_overwrites_existing_entry() {
        let cache = ResponseCache::new();
        cache.insert("/logs/", &json!([1]));
        cache.insert("/logs/", &json!([1, 2]));

        assert_eq!(cache.get("/logs/"), Some(json!([1, 2])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = ResponseCache::new();
        cache.insert("/patients/", &json!([]));
        cache.insert("/doctors/", &json!([]));

        cache.clear();

        assert!(cache.is_empty());
    }
}
