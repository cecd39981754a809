//! Outcome statistics
//!
//! Derived on demand from the store's per-outcome counts; nothing here is
//! persisted. The mutant/human ratio is 0 when no humans are on record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::storage::{StorageError, Store};

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),
}

/// Aggregate counts at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub count_mutant_dna: u64,
    pub count_human_dna: u64,
    pub ratio: f64,
}

impl StatsSnapshot {
    /// Build a snapshot from raw counts.
    pub fn from_counts(count_mutant_dna: u64, count_human_dna: u64) -> Self {
        let ratio = if count_human_dna > 0 {
            count_mutant_dna as f64 / count_human_dna as f64
        } else {
            0.0
        };
        Self {
            count_mutant_dna,
            count_human_dna,
            ratio,
        }
    }
}

/// Read-only view over a store's outcome counts.
pub struct StatsAggregator<S: Store> {
    store: Arc<S>,
}

impl<S: Store> StatsAggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn snapshot(&self) -> Result<StatsSnapshot, StatsError> {
        let mutants = self.store.count_by_outcome(true)?;
        let humans = self.store.count_by_outcome(false)?;
        let snapshot = StatsSnapshot::from_counts(mutants, humans);

        log_event_with_fields(
            Event::StatsComputed,
            &[
                ("count_mutant_dna", mutants.to_string().as_str()),
                ("count_human_dna", humans.to_string().as_str()),
            ],
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ClassificationRecord, MemoryStore};

    fn store_with(mutants: usize, humans: usize) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        for i in 0..mutants {
            store.save(&ClassificationRecord::new(format!("m{}", i), true)).unwrap();
        }
        for i in 0..humans {
            store.save(&ClassificationRecord::new(format!("h{}", i), false)).unwrap();
        }
        store
    }

    #[test]
    fn test_empty_store_ratio_zero() {
        let snapshot = StatsAggregator::new(store_with(0, 0)).snapshot().unwrap();
        assert_eq!(snapshot, StatsSnapshot::from_counts(0, 0));
        assert_eq!(snapshot.ratio, 0.0);
    }

    #[test]
    fn test_no_humans_ratio_zero() {
        let snapshot = StatsAggregator::new(store_with(3, 0)).snapshot().unwrap();
        assert_eq!(snapshot.count_mutant_dna, 3);
        assert_eq!(snapshot.count_human_dna, 0);
        assert_eq!(snapshot.ratio, 0.0);
    }

    #[test]
    fn test_ratio() {
        let snapshot = StatsAggregator::new(store_with(2, 4)).snapshot().unwrap();
        assert_eq!(snapshot.ratio, 0.5);
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_reads(true);
        let err = StatsAggregator::new(store).snapshot().unwrap_err();
        assert!(matches!(err, StatsError::StoreUnavailable(_)));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(StatsSnapshot::from_counts(40, 100)).unwrap();
        assert_eq!(json["count_mutant_dna"], 40);
        assert_eq!(json["count_human_dna"], 100);
        assert_eq!(json["ratio"], 0.4);
    }
}
