//! Time-bounded memo for `/stats` responses.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::stats::{StatsError, StatsSnapshot};

/// Holds the last computed snapshot until it is older than the TTL.
///
/// A zero TTL disables caching. Refreshes are serialized: concurrent
/// callers on an expired entry compute once and share the result.
pub struct StatsCache {
    ttl: Duration,
    entry: Mutex<Option<(Instant, StatsSnapshot)>>,
}

impl StatsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Return the cached snapshot if still fresh, otherwise compute and keep
    /// a new one. A failed computation leaves the previous entry untouched.
    pub fn get_or_refresh<F>(&self, compute: F) -> Result<StatsSnapshot, StatsError>
    where
        F: FnOnce() -> Result<StatsSnapshot, StatsError>,
    {
        let mut entry = self.entry.lock().unwrap_or_else(|p| p.into_inner());
        if let Some((computed_at, snapshot)) = *entry {
            if computed_at.elapsed() < self.ttl {
                return Ok(snapshot);
            }
        }

        let snapshot = compute()?;
        *entry = Some((Instant::now(), snapshot));
        Ok(snapshot)
    }

    pub fn invalidate(&self) {
        *self.entry.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use std::cell::Cell;

    #[test]
    fn test_fresh_entry_is_reused() {
        let cache = StatsCache::new(Duration::from_secs(60));
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            Ok(StatsSnapshot::from_counts(calls.get(), 1))
        };

        let first = cache.get_or_refresh(compute).unwrap();
        let second = cache
            .get_or_refresh(|| Ok(StatsSnapshot::from_counts(99, 1)))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_zero_ttl_always_recomputes() {
        let cache = StatsCache::new(Duration::ZERO);
        cache
            .get_or_refresh(|| Ok(StatsSnapshot::from_counts(1, 1)))
            .unwrap();
        let second = cache
            .get_or_refresh(|| Ok(StatsSnapshot::from_counts(2, 1)))
            .unwrap();
        assert_eq!(second.count_mutant_dna, 2);
    }

    #[test]
    fn test_invalidate_forces_refresh() {
        let cache = StatsCache::new(Duration::from_secs(60));
        cache
            .get_or_refresh(|| Ok(StatsSnapshot::from_counts(1, 1)))
            .unwrap();
        cache.invalidate();
        let refreshed = cache
            .get_or_refresh(|| Ok(StatsSnapshot::from_counts(5, 1)))
            .unwrap();
        assert_eq!(refreshed.count_mutant_dna, 5);
    }

    #[test]
    fn test_failure_keeps_nothing() {
        let cache = StatsCache::new(Duration::from_secs(60));
        let result = cache.get_or_refresh(|| {
            Err(StatsError::from(StorageError::write_failed_no_source("down")))
        });
        assert!(result.is_err());

        let next = cache
            .get_or_refresh(|| Ok(StatsSnapshot::from_counts(3, 1)))
            .unwrap();
        assert_eq!(next.count_mutant_dna, 3);
    }
}
