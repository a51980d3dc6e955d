//! Argument-keyed memoization.

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;

use crate::observability::metrics;

/// Point-in-time counters for one cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// A thread-safe map from call arguments to a shared result.
///
/// Entries are never invalidated: once a key is loaded, the value is served
/// until the process exits, even if the underlying data changes. Failed loads
/// are not stored, so the next call retries.
#[derive(Clone)]
pub struct MemoCache<K, V> {
    name: &'static str,
    entries: Arc<DashMap<K, Arc<V>>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// `name` labels metrics and logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Arc::new(DashMap::new()),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).map(|r| r.value().clone())
    }

    /// Return the cached value for `key`, or run `load` and cache its result.
    ///
    /// Concurrent misses on one key may both run `load`; the first stored
    /// value wins and is what every caller receives.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        load: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        if let Some(value) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            metrics::record_cache_lookup(self.name, true);
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        metrics::record_cache_lookup(self.name, false);

        // Guard must not be held while loading.
        let loaded = Arc::new(load()?);
        let stored = self.entries.entry(key).or_insert(loaded).value().clone();
        metrics::record_cache_size(self.name, self.entries.len());
        Ok(stored)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
