//! The shared response store.
//!
//! Combines a key → entry map with a recency queue for LRU eviction.
//! Every handler task holds an `Arc<ResponseCache>`; a single mutex
//! serializes all access.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::cache::entry::CacheEntry;
use crate::observability::metrics;

/// Capacity- and TTL-bounded store with least-recently-used eviction.
#[derive(Debug)]
pub struct ResponseCache {
    capacity: usize,
    ttl: Duration,
    inner: Mutex<CacheInner>,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    /// Recency order: front = most recently used, back = next to evict.
    lru: VecDeque<String>,
}

impl CacheInner {
    /// Mark `key` as most recently used.
    fn touch(&mut self, key: &str) {
        self.lru.retain(|k| k != key);
        self.lru.push_front(key.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.lru.retain(|k| k != key);
    }
}

impl ResponseCache {
    /// Create an empty cache. `capacity` must be at least 1 (enforced by
    /// config validation).
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity,
            ttl,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Look up `key`. An entry past its TTL is deleted and reported as a
    /// miss, atomically with the check; a live entry is promoted to most
    /// recently used and its body cloned out.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut inner = self.inner.lock().expect("cache lock poisoned");

        let expired = match inner.entries.get(key) {
            None => {
                metrics::record_cache_lookup("miss");
                return None;
            }
            Some(entry) => entry.is_expired(self.ttl),
        };

        if expired {
            inner.remove(key);
            metrics::record_cache_lookup("expired");
            return None;
        }

        inner.touch(key);
        metrics::record_cache_lookup("hit");
        inner.entries.get(key).map(|entry| entry.body.clone())
    }

    /// Insert `key`, evicting the least-recently-used entry if the cache
    /// is full. Re-inserting an existing key lands it at the
    /// most-recently-used position with a fresh timestamp.
    pub fn set(&self, key: &str, body: Vec<u8>) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");

        if inner.entries.remove(key).is_some() {
            inner.lru.retain(|k| k != key);
        } else if inner.entries.len() >= self.capacity {
            if let Some(oldest) = inner.lru.pop_back() {
                inner.entries.remove(&oldest);
                metrics::record_cache_eviction();
                tracing::debug!(key = %oldest, "evicted least-recently-used entry");
            }
        }

        inner.entries.insert(key.to_string(), CacheEntry::new(body));
        inner.touch(key);
        metrics::record_cache_size(inner.entries.len());
    }

    /// Empty the store.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.entries.clear();
        inner.lru.clear();
        metrics::record_cache_size(0);
    }

    /// Current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache lock poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry past its TTL; returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let mut inner = self.inner.lock().expect("cache lock poisoned");

        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.remove(key);
        }
        metrics::record_cache_size(inner.entries.len());
        expired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> ResponseCache {
        ResponseCache::new(capacity, Duration::from_secs(300))
    }

    #[test]
    fn set_then_get_round_trips() {
        let cache = cache(10);
        cache.set("GET:http://example.com/", b"response".to_vec());
        assert_eq!(
            cache.get("GET:http://example.com/"),
            Some(b"response".to_vec())
        );
    }

    #[test]
    fn get_missing_key_is_a_miss() {
        let cache = cache(10);
        assert_eq!(cache.get("GET:http://nowhere/"), None);
    }

    #[test]
    fn expired_entry_is_removed_on_read() {
        let cache = ResponseCache::new(10, Duration::from_millis(10));
        cache.set("k", b"v".to_vec());
        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let cache = cache(3);
        cache.set("a", b"1".to_vec());
        cache.set("b", b"2".to_vec());
        cache.set("c", b"3".to_vec());
        cache.set("d", b"4".to_vec());

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("a"), None);
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert!(cache.get("d").is_some());
    }

    #[test]
    fn get_promotes_entry_out_of_eviction_order() {
        let cache = cache(3);
        cache.set("a", b"1".to_vec());
        cache.set("b", b"2".to_vec());
        cache.set("c", b"3".to_vec());

        // "a" becomes most recently used, so "b" is evicted next.
        cache.get("a");
        cache.set("d", b"4".to_vec());

        assert!(cache.get("a").is_some());
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn reinsertion_resets_recency() {
        let cache = cache(3);
        cache.set("k", b"v1".to_vec());
        cache.set("x", b"2".to_vec());
        cache.set("y", b"3".to_vec());
        cache.set("k", b"v2".to_vec());

        // Cache is at capacity; the next insert must evict "x", not "k".
        cache.set("z", b"4".to_vec());

        assert_eq!(cache.get("k"), Some(b"v2".to_vec()));
        assert_eq!(cache.get("x"), None);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn reinsertion_does_not_grow_past_capacity() {
        let cache = cache(2);
        cache.set("a", b"1".to_vec());
        cache.set("b", b"2".to_vec());
        cache.set("a", b"3".to_vec());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn clear_empties_the_store() {
        let cache = cache(10);
        cache.set("a", b"1".to_vec());
        cache.set("b", b"2".to_vec());
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn sweep_removes_only_expired_entries() {
        let cache = ResponseCache::new(10, Duration::from_millis(20));
        cache.set("old", b"1".to_vec());
        std::thread::sleep(Duration::from_millis(40));
        cache.set("fresh", b"2".to_vec());

        assert_eq!(cache.sweep_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("fresh").is_some());
    }

    #[test]
    fn concurrent_access_is_serialized() {
        use std::sync::Arc;

        let cache = Arc::new(ResponseCache::new(8, Duration::from_secs(300)));
        let mut handles = Vec::new();
        for t in 0..4 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("k{}", (t * 100 + i) % 16);
                    cache.set(&key, vec![t as u8]);
                    cache.get(&key);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 8);
    }
}
