//! In-memory TTL cache with least-recently-used eviction.
//!
//! ## Lifecycle
//!
//! Caches are owned by the [`crate::Retriever`] built once at process start
//! and live for the rest of the process. They need no teardown and their
//! contents persist across calls, unlike the per-request state of a single
//! lookup.
//!
//! Entries expire once their TTL has elapsed, whether or not they were read
//! in the meantime. When the cache is full, the least-recently-accessed entry
//! is evicted.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    last_accessed: Instant,
}

/// Capacity-bounded cache whose entries expire after a fixed TTL.
///
/// Uses a blocking mutex; the lock is never held across an `.await`.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    capacity: usize,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries for `ttl` each.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Get a fresh value, refreshing its recency.
    ///
    /// Expired entries are dropped on sight.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.lock();

        let expired = match entries.get_mut(key) {
            Some(entry) if now.duration_since(entry.inserted_at) <= self.ttl => {
                entry.last_accessed = now;
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    /// Insert a value, evicting expired entries first and then the
    /// least-recently-used one if the cache is still full.
    pub fn insert(&self, key: K, value: V) {
        let now = Instant::now();
        let mut entries = self.lock();

        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let ttl = self.ttl;
            entries.retain(|_, entry| now.duration_since(entry.inserted_at) <= ttl);

            if entries.len() >= self.capacity {
                let lru = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_accessed)
                    .map(|(k, _)| k.clone());
                if let Some(lru) = lru {
                    entries.remove(&lru);
                }
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
                last_accessed: now,
            },
        );
    }

    /// Number of stored entries, including ones not yet noticed as expired.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
        // A poisoned map is still structurally valid.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
