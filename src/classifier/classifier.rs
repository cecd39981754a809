//! Memoized classification
//!
//! Lookup order, stopping at the first hit:
//! 1. In-memory result cache
//! 2. Persisted record in the store (copied into the cache)
//! 3. Full scan, then write the cache and the store
//!
//! The cache is written before the store. If the store write fails the error
//! is returned, but the cache keeps the computed value; a retry on this
//! instance is then served from the cache and the store never learns the
//! outcome. The two writes share no transaction.
//!
//! There is no per-key mutual exclusion. Two callers racing on a key nobody
//! has seen may both scan; both compute the same value and the store keeps
//! one record.

use std::sync::Arc;

use crate::cache::ResultCache;
use crate::dna::DnaGrid;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::scanner::SequenceScanner;
use crate::storage::{ClassificationRecord, Store};

use super::errors::{ClassifyError, ClassifyResult};

/// Where an outcome was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeSource {
    Cache,
    Store,
    Scan,
}

impl OutcomeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeSource::Cache => "cache",
            OutcomeSource::Store => "store",
            OutcomeSource::Scan => "scan",
        }
    }
}

/// A classification outcome and its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_mutant: bool,
    pub source: OutcomeSource,
}

/// Classifies grids, remembering every outcome it has produced or loaded.
///
/// `Send + Sync` whenever the store is; share it behind an `Arc` and call
/// [`classify`](Self::classify) from any thread. Calls block on store I/O.
pub struct Classifier<S: Store> {
    cache: ResultCache,
    store: Arc<S>,
    scanner: SequenceScanner,
    metrics: Arc<MetricsRegistry>,
}

impl<S: Store> Classifier<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_metrics(store, Arc::new(MetricsRegistry::new()))
    }

    pub fn with_metrics(store: Arc<S>, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            cache: ResultCache::new(),
            store,
            scanner: SequenceScanner::new(),
            metrics,
        }
    }

    /// True when the grid holds more than one run.
    pub fn classify(&self, grid: &DnaGrid) -> ClassifyResult<bool> {
        self.classify_detailed(grid).map(|c| c.is_mutant)
    }

    /// Like [`classify`](Self::classify), also reporting which layer answered.
    pub fn classify_detailed(&self, grid: &DnaGrid) -> ClassifyResult<Classification> {
        self.metrics.increment_classifications();
        let key = grid.key();

        if let Some(is_mutant) = self.cache.get(key) {
            self.metrics.increment_cache_hits();
            log_outcome(Event::ClassifyCacheHit, grid, is_mutant);
            return Ok(Classification {
                is_mutant,
                source: OutcomeSource::Cache,
            });
        }

        let persisted = self.store.find_by_key(key).map_err(|e| self.fail(grid, e.into()))?;
        if let Some(record) = persisted {
            self.cache.put(key, record.is_mutant);
            self.metrics.increment_store_hits();
            log_outcome(Event::ClassifyStoreHit, grid, record.is_mutant);
            return Ok(Classification {
                is_mutant: record.is_mutant,
                source: OutcomeSource::Store,
            });
        }

        let is_mutant = self.scanner.evaluate(grid);
        self.metrics.increment_scans();

        self.cache.put(key, is_mutant);
        self.store
            .save(&ClassificationRecord::new(key, is_mutant))
            .map_err(|e| self.fail(grid, e.into()))?;
        self.metrics.increment_store_writes();

        log_outcome(Event::ClassifyScanComplete, grid, is_mutant);
        Ok(Classification {
            is_mutant,
            source: OutcomeSource::Scan,
        })
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    fn fail(&self, grid: &DnaGrid, err: ClassifyError) -> ClassifyError {
        self.metrics.increment_store_failures();
        log_event_with_fields(
            Event::ClassifyFailed,
            &[
                ("size", grid.size().to_string().as_str()),
                ("error", err.to_string().as_str()),
            ],
        );
        err
    }
}

fn log_outcome(event: Event, grid: &DnaGrid, is_mutant: bool) {
    log_event_with_fields(
        event,
        &[
            ("size", grid.size().to_string().as_str()),
            ("is_mutant", if is_mutant { "true" } else { "false" }),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::thread;

    fn grid(rows: &[&str]) -> DnaGrid {
        DnaGrid::from_rows(rows).unwrap()
    }

    fn mutant() -> DnaGrid {
        grid(&["AAAA", "CAGT", "TTAT", "AAAA"])
    }

    fn human() -> DnaGrid {
        grid(&["ATGC", "CAGT", "TTAT", "AGAA"])
    }

    #[test]
    fn test_first_call_scans_and_records() {
        let store = Arc::new(MemoryStore::new());
        let classifier = Classifier::new(Arc::clone(&store));

        let result = classifier.classify_detailed(&mutant()).unwrap();

        assert!(result.is_mutant);
        assert_eq!(result.source, OutcomeSource::Scan);
        assert_eq!(store.save_calls(), 1);
        assert_eq!(classifier.cache().get(mutant().key()), Some(true));
        assert!(store.find_by_key(mutant().key()).unwrap().unwrap().is_mutant);
    }

    #[test]
    fn test_second_call_hits_cache() {
        let store = Arc::new(MemoryStore::new());
        let classifier = Classifier::new(Arc::clone(&store));

        let first = classifier.classify(&human()).unwrap();
        let second = classifier.classify_detailed(&human()).unwrap();

        assert!(!first);
        assert_eq!(second.is_mutant, first);
        assert_eq!(second.source, OutcomeSource::Cache);
        assert_eq!(classifier.metrics().scans(), 1);
        assert_eq!(store.save_calls(), 1);
        assert_eq!(store.find_calls(), 1);
    }

    #[test]
    fn test_store_hit_populates_cache() {
        let store = Arc::new(MemoryStore::new());
        store.save(&ClassificationRecord::new(mutant().key(), true)).unwrap();
        let classifier = Classifier::new(Arc::clone(&store));

        let result = classifier.classify_detailed(&mutant()).unwrap();

        assert!(result.is_mutant);
        assert_eq!(result.source, OutcomeSource::Store);
        assert_eq!(classifier.metrics().scans(), 0);
        assert_eq!(classifier.cache().get(mutant().key()), Some(true));
        // The pre-seeded save only.
        assert_eq!(store.save_calls(), 1);
    }

    #[test]
    fn test_persisted_outcome_is_trusted() {
        // A persisted outcome wins over what a scan would say.
        let store = Arc::new(MemoryStore::new());
        store.save(&ClassificationRecord::new(human().key(), true)).unwrap();
        let classifier = Classifier::new(store);

        assert!(classifier.classify(&human()).unwrap());
    }

    #[test]
    fn test_store_write_failure_propagates() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let classifier = Classifier::new(Arc::clone(&store));

        let err = classifier.classify(&mutant()).unwrap_err();

        assert!(matches!(err, ClassifyError::StoreUnavailable(_)));
        assert!(store.is_empty());
        // Cache already holds the value: the documented cache/store divergence.
        assert_eq!(classifier.cache().get(mutant().key()), Some(true));
        assert_eq!(classifier.metrics().snapshot().store_failures, 1);
        assert_eq!(classifier.metrics().store_writes(), 0);
    }

    #[test]
    fn test_store_read_failure_propagates() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_reads(true);
        let classifier = Classifier::new(Arc::clone(&store));

        assert!(classifier.classify(&human()).is_err());
        assert_eq!(classifier.metrics().scans(), 0);
        assert!(classifier.cache().is_empty());
    }

    #[test]
    fn test_independent_classifiers_do_not_share_cache() {
        let a = Classifier::new(Arc::new(MemoryStore::new()));
        let b = Classifier::new(Arc::new(MemoryStore::new()));

        a.classify(&mutant()).unwrap();

        assert!(a.cache().contains(mutant().key()));
        assert!(!b.cache().contains(mutant().key()));
    }

    #[test]
    fn test_concurrent_classify_is_consistent() {
        let store = Arc::new(MemoryStore::new());
        let classifier = Arc::new(Classifier::new(Arc::clone(&store)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let classifier = Arc::clone(&classifier);
                thread::spawn(move || {
                    (
                        classifier.classify(&mutant()).unwrap(),
                        classifier.classify(&human()).unwrap(),
                    )
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), (true, false));
        }

        // Racing callers may duplicate a scan, but the store keeps one record per key.
        assert_eq!(store.len(), 2);
        assert_eq!(store.count_by_outcome(true).unwrap(), 1);
        assert_eq!(store.count_by_outcome(false).unwrap(), 1);
    }
}
