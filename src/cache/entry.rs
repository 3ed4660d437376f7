//! A single cached response.

use std::time::{Duration, Instant};

/// One stored response body with its insertion time.
///
/// Entries are owned exclusively by the cache; `get` hands out clones of
/// the body, never references into the store.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The raw response bytes as received from the origin.
    pub body: Vec<u8>,
    /// When the entry was inserted (monotonic clock).
    inserted_at: Instant,
}

impl CacheEntry {
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            body,
            inserted_at: Instant::now(),
        }
    }

    /// An entry is expired once strictly more than `ttl` has elapsed
    /// since insertion.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() > ttl
    }
}
