//! TTL-bound existence cache.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::observability::metrics;

/// Time source for expiry checks. Injected so tests can advance time
/// without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Default clock backed by `Instant::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    value: bool,
    expires_at: Instant,
}

/// A thread-safe slug → bool cache with per-entry expiry.
///
/// Concurrent writes to the same slug are idempotent (the same slug
/// resolves to the same bool), so no cross-key locking is needed beyond
/// what the map provides.
#[derive(Clone)]
pub struct ExistenceCache {
    entries: Arc<DashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
    /// Label for cache hit/miss metrics.
    name: &'static str,
}

impl ExistenceCache {
    pub fn new(name: &'static str) -> Self {
        Self::with_clock(name, Arc::new(MonotonicClock))
    }

    pub fn with_clock(name: &'static str, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock,
            name,
        }
    }

    /// Return the cached value for `slug`, dropping the entry if its
    /// deadline has passed.
    pub fn get(&self, slug: &str) -> Option<bool> {
        let now = self.clock.now();
        let value = match self.entries.get(slug) {
            Some(entry) if entry.expires_at > now => Some(entry.value),
            _ => None,
        };
        if value.is_none() {
            // Expired entries are removed on read rather than by timer.
            self.entries.remove_if(slug, |_, e| e.expires_at <= now);
        }
        metrics::record_cache_lookup(self.name, value.is_some());
        value
    }

    /// Upsert the value for `slug` with a fresh deadline.
    pub fn set(&self, slug: &str, value: bool, ttl: Duration) {
        self.entries.insert(
            slug.to_string(),
            Entry {
                value,
                expires_at: self.clock.now() + ttl,
            },
        );
        metrics::record_cache_size(self.name, self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
