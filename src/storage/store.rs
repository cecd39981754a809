//! The `Store` contract and its file-backed implementation.
//!
//! `FileStore` keeps the classification log on disk and an index of every
//! key in memory. Reads are served from the index; writes go to disk first
//! and reach the index only once fsynced, so a caller always reads its own
//! completed writes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::observability::{log_event_with_fields, Event};

use super::errors::{StorageError, StorageResult};
use super::reader::StorageReader;
use super::record::ClassificationRecord;
use super::writer::StorageWriter;

/// Persistent record of past classifications.
///
/// Implementations must be safe to share across threads and must give a
/// single caller read-your-writes consistency.
pub trait Store: Send + Sync {
    /// Previously persisted record for `key`, if any.
    fn find_by_key(&self, key: &str) -> StorageResult<Option<ClassificationRecord>>;

    /// Persist a record. Saving a key that already exists is a no-op.
    fn save(&self, record: &ClassificationRecord) -> StorageResult<()>;

    /// Number of distinct keys recorded with the given outcome.
    fn count_by_outcome(&self, is_mutant: bool) -> StorageResult<u64>;
}

/// In-memory view of the log: one entry per key plus per-outcome tallies.
#[derive(Debug, Default)]
pub(crate) struct StoreIndex {
    records: HashMap<String, ClassificationRecord>,
    mutants: u64,
    humans: u64,
}

impl StoreIndex {
    pub(crate) fn get(&self, key: &str) -> Option<&ClassificationRecord> {
        self.records.get(key)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Adds a record unless its key is already indexed. First record wins.
    pub(crate) fn insert(&mut self, record: ClassificationRecord) -> bool {
        if self.records.contains_key(&record.key) {
            return false;
        }
        if record.is_mutant {
            self.mutants += 1;
        } else {
            self.humans += 1;
        }
        self.records.insert(record.key.clone(), record);
        true
    }

    pub(crate) fn count(&self, is_mutant: bool) -> u64 {
        if is_mutant {
            self.mutants
        } else {
            self.humans
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

/// Durable store backed by an append-only, checksummed log file.
pub struct FileStore {
    data_dir: PathBuf,
    writer: Mutex<StorageWriter>,
    index: RwLock<StoreIndex>,
}

impl FileStore {
    /// Opens (or creates) the store under `data_dir` and rebuilds the index.
    ///
    /// Any corrupt record aborts the open.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let writer = StorageWriter::open(data_dir)?;

        let mut index = StoreIndex::default();
        let mut reader = StorageReader::open(writer.path())?;
        let mut scanned = 0usize;
        loop {
            match reader.read_next() {
                Ok(Some(record)) => {
                    scanned += 1;
                    index.insert(record);
                }
                Ok(None) => break,
                Err(e) => {
                    if e.is_fatal() {
                        log_event_with_fields(
                            Event::StoreCorruption,
                            &[("error", e.to_string().as_str())],
                        );
                    }
                    return Err(e);
                }
            }
        }

        log_event_with_fields(
            Event::StoreOpened,
            &[
                ("path", writer.path().display().to_string().as_str()),
                ("records", scanned.to_string().as_str()),
                ("keys", index.len().to_string().as_str()),
            ],
        );

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            writer: Mutex::new(writer),
            index: RwLock::new(index),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Number of distinct keys on record.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self
            .index
            .read()
            .map_err(|_| StorageError::lock_poisoned("store index"))?
            .len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl Store for FileStore {
    fn find_by_key(&self, key: &str) -> StorageResult<Option<ClassificationRecord>> {
        let index = self
            .index
            .read()
            .map_err(|_| StorageError::lock_poisoned("store index"))?;
        Ok(index.get(key).cloned())
    }

    fn save(&self, record: &ClassificationRecord) -> StorageResult<()> {
        // Holding the writer lock across check-and-append keeps one record per key.
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| StorageError::lock_poisoned("store writer"))?;

        {
            let index = self
                .index
                .read()
                .map_err(|_| StorageError::lock_poisoned("store index"))?;
            if index.contains(&record.key) {
                return Ok(());
            }
        }

        if let Err(e) = writer.append(record) {
            log_event_with_fields(
                Event::StoreWriteFailed,
                &[("error", e.to_string().as_str()), ("code", e.code().code())],
            );
            return Err(e);
        }

        self.index
            .write()
            .map_err(|_| StorageError::lock_poisoned("store index"))?
            .insert(record.clone());
        Ok(())
    }

    fn count_by_outcome(&self, is_mutant: bool) -> StorageResult<u64> {
        let index = self
            .index
            .read()
            .map_err(|_| StorageError::lock_poisoned("store index"))?;
        Ok(index.count(is_mutant))
    }
}
