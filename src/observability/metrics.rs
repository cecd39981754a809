//! Metrics registry
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Atomic, Relaxed ordering; exactness within a single counter only

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the classification service.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    classifications: AtomicU64,
    cache_hits: AtomicU64,
    store_hits: AtomicU64,
    scans: AtomicU64,
    store_writes: AtomicU64,
    store_failures: AtomicU64,
    inputs_rejected: AtomicU64,
    stats_queries: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_classifications(&self) {
        self.classifications.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cache_hits(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_hits(&self) {
        self.store_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_scans(&self) {
        self.scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_writes(&self) {
        self.store_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_failures(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_inputs_rejected(&self) {
        self.inputs_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_stats_queries(&self) {
        self.stats_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Full scans performed.
    pub fn scans(&self) -> u64 {
        self.scans.load(Ordering::Relaxed)
    }

    /// Store writes attempted by the classifier.
    pub fn store_writes(&self) -> u64 {
        self.store_writes.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            classifications: self.classifications.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            store_hits: self.store_hits.load(Ordering::Relaxed),
            scans: self.scans.load(Ordering::Relaxed),
            store_writes: self.store_writes.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
            inputs_rejected: self.inputs_rejected.load(Ordering::Relaxed),
            stats_queries: self.stats_queries.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub classifications: u64,
    pub cache_hits: u64,
    pub store_hits: u64,
    pub scans: u64,
    pub store_writes: u64,
    pub store_failures: u64,
    pub inputs_rejected: u64,
    pub stats_queries: u64,
}
