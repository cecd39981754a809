//! In-memory `Store` for tests and ephemeral runs.
//!
//! Same contract as `FileStore`, minus durability. Counts every `save` call
//! and can be switched into a failing mode to exercise error paths.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use super::errors::{StorageError, StorageResult};
use super::record::ClassificationRecord;
use super::store::{Store, StoreIndex};

#[derive(Debug, Default)]
pub struct MemoryStore {
    index: RwLock<StoreIndex>,
    save_calls: AtomicU64,
    find_calls: AtomicU64,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls received, including no-op duplicates and failures.
    pub fn save_calls(&self) -> u64 {
        self.save_calls.load(Ordering::SeqCst)
    }

    /// Number of `find_by_key` calls received.
    pub fn find_calls(&self) -> u64 {
        self.find_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent `save` calls fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent reads (`find_by_key`, `count_by_outcome`) fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.index.read().map(|i| i.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_reads(&self) -> StorageResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::io_error(
                "store unavailable",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "reads disabled"),
            ));
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn find_by_key(&self, key: &str) -> StorageResult<Option<ClassificationRecord>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        let index = self
            .index
            .read()
            .map_err(|_| StorageError::lock_poisoned("memory store"))?;
        Ok(index.get(key).cloned())
    }

    fn save(&self, record: &ClassificationRecord) -> StorageResult<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::write_failed_no_source("writes disabled"));
        }
        self.index
            .write()
            .map_err(|_| StorageError::lock_poisoned("memory store"))?
            .insert(record.clone());
        Ok(())
    }

    fn count_by_outcome(&self, is_mutant: bool) -> StorageResult<u64> {
        self.check_reads()?;
        let index = self
            .index
            .read()
            .map_err(|_| StorageError::lock_poisoned("memory store"))?;
        Ok(index.count(is_mutant))
    }
}
