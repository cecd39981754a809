//! Classification storage
//!
//! The persistent record of every grid ever classified.
//!
//! # Design Principles
//!
//! - Append-only (no in-place updates, no deletes)
//! - Checksum-verified on every read
//! - One record per grid key; first record wins
//! - fsync before a write is acknowledged
//! - Corruption halts the open instead of being skipped

mod checksum;
mod errors;
mod memory;
mod reader;
mod record;
mod store;
mod writer;

pub use checksum::compute_checksum;
pub use errors::{Severity, StorageError, StorageErrorCode, StorageResult};
pub use memory::MemoryStore;
pub use reader::StorageReader;
pub use record::{ClassificationRecord, MIN_RECORD_SIZE};
pub use store::{FileStore, Store};
pub use writer::{store_path, StorageWriter, STORE_FILE, STORE_SUBDIR};
