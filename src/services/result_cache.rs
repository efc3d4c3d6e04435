//! Bounded memo of computed results, shared across threads.
//!
//! Backed by `moka`'s TinyLFU cache: once `max_entries` is reached the least
//! valuable entries are evicted. Concurrent misses on one key compute once;
//! other callers wait and receive the same `Arc`.

use std::sync::Arc;

use moka::sync::Cache;

use crate::domain::results::Results;

pub struct ResultCache {
    cache: Cache<String, Arc<Results>>,
}

impl ResultCache {
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::new(max_entries),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<Results>> {
        self.cache.get(key)
    }

    /// Returns the cached value for `key`, running `compute` only on a miss.
    pub fn get_or_compute(&self, key: String, compute: impl FnOnce() -> Results) -> Arc<Results> {
        self.cache.get_with(key, || Arc::new(compute()))
    }

    #[cfg(test)]
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
