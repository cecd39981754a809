//! Classification result cache
//!
//! In-memory memo of grid key -> outcome.
//!
//! - Safe for concurrent readers and writers
//! - Last writer wins; all writers for one key carry the same value
//! - No eviction: entries live as long as the cache
//! - Hit/miss counters are passive and never influence lookups

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Point-in-time cache counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Number of `put` calls.
    pub writes: u64,
}

/// Concurrent map from canonical grid key to classification outcome.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, bool>>,
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously recorded outcome.
    pub fn get(&self, key: &str) -> Option<bool> {
        let found = match self.entries.read() {
            Ok(entries) => entries.get(key).copied(),
            // A poisoned lock still holds consistent bool entries.
            Err(poisoned) => poisoned.into_inner().get(key).copied(),
        };

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Record an outcome.
    pub fn put(&self, key: impl Into<String>, value: bool) {
        let key = key.into();
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key, value);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(key, value);
            }
        }
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Whether a key is present. Does not touch the counters.
    pub fn contains(&self, key: &str) -> bool {
        match self.entries.read() {
            Ok(entries) => entries.contains_key(key),
            Err(poisoned) => poisoned.into_inner().contains_key(key),
        }
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }
}
