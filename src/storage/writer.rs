//! Append-only writer with fsync on every record
//!
//! Records are never rewritten in place. A record is durable once
//! [`StorageWriter::append`] returns.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::observability::{log_event_with_fields, Event};

use super::errors::{StorageError, StorageResult};
use super::record::ClassificationRecord;

/// Subdirectory of the data directory holding the store file.
pub const STORE_SUBDIR: &str = "data";

/// Name of the classification log file.
pub const STORE_FILE: &str = "classifications.dat";

/// Location of the classification log under `data_dir`.
pub fn store_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STORE_SUBDIR).join(STORE_FILE)
}

/// Appends framed records to `<data_dir>/data/classifications.dat`.
pub struct StorageWriter {
    path: PathBuf,
    file: File,
    current_offset: u64,
}

impl StorageWriter {
    /// Opens or creates the store file, creating parent directories if needed.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let subdir = data_dir.join(STORE_SUBDIR);
        if !subdir.exists() {
            fs::create_dir_all(&subdir).map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to create data directory: {}", subdir.display()),
                    e,
                )
            })?;
        }

        let path = store_path(data_dir);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                StorageError::write_failed(format!("Failed to open store file: {}", path.display()), e)
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StorageError::write_failed("Failed to read file metadata", e))?
            .len();

        Ok(Self {
            path,
            file,
            current_offset,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset the next record will be written at.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Appends a record and fsyncs. Returns the offset it was written at.
    ///
    /// Bytes past the last acknowledged record are cut off before writing,
    /// and a failed append truncates its own partial frame, so the file
    /// always ends on a complete record.
    pub fn append(&mut self, record: &ClassificationRecord) -> StorageResult<u64> {
        let bytes = record.serialize();
        let offset = self.current_offset;

        let file_len = self
            .file
            .metadata()
            .map_err(|e| StorageError::write_failed("Failed to read file metadata", e))?
            .len();
        if file_len < offset {
            return Err(StorageError::corruption_at_offset(
                file_len,
                "Store file is shorter than the last acknowledged record",
            ));
        }
        if file_len > offset {
            self.truncate_to(offset)?;
            log_event_with_fields(
                Event::StoreTailTruncated,
                &[
                    ("offset", offset.to_string().as_str()),
                    ("discarded_bytes", (file_len - offset).to_string().as_str()),
                ],
            );
        }

        if let Err(e) = self.file.write_all(&bytes) {
            // A failed truncate is retried by the next append.
            let _ = self.truncate_to(offset);
            return Err(StorageError::write_failed(
                format!("Failed to append record at offset {}", offset),
                e,
            ));
        }

        if let Err(e) = self.file.sync_all() {
            let _ = self.truncate_to(offset);
            return Err(StorageError::write_failed(
                format!("fsync failed after record at offset {}", offset),
                e,
            ));
        }

        self.current_offset += bytes.len() as u64;
        Ok(offset)
    }

    fn truncate_to(&mut self, offset: u64) -> StorageResult<()> {
        self.file.set_len(offset).map_err(|e| {
            StorageError::write_failed(format!("Failed to truncate store file to {}", offset), e)
        })?;
        self.file.sync_all().map_err(|e| {
            StorageError::write_failed(format!("fsync failed after truncating to {}", offset), e)
        })
    }
}
