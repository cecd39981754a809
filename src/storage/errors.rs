//! Storage error types
//!
//! Error codes:
//! - MUTANT_STORAGE_IO_ERROR (ERROR severity)
//! - MUTANT_STORAGE_WRITE_FAILED (ERROR severity)
//! - MUTANT_STORAGE_READ_FAILED (ERROR severity)
//! - MUTANT_DATA_CORRUPTION (FATAL severity)

use std::fmt;
use std::io;

/// Severity levels for storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// Store cannot be trusted; process must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Disk I/O failure
    MutantStorageIoError,
    /// Record write failed
    MutantStorageWriteFailed,
    /// Record read failed
    MutantStorageReadFailed,
    /// Checksum or framing failure
    MutantDataCorruption,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::MutantStorageIoError => "MUTANT_STORAGE_IO_ERROR",
            StorageErrorCode::MutantStorageWriteFailed => "MUTANT_STORAGE_WRITE_FAILED",
            StorageErrorCode::MutantStorageReadFailed => "MUTANT_STORAGE_READ_FAILED",
            StorageErrorCode::MutantDataCorruption => "MUTANT_DATA_CORRUPTION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StorageErrorCode::MutantDataCorruption => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with code, message and optional context
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StorageError {
    fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Generic I/O failure
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StorageErrorCode::MutantStorageIoError, message)
        }
    }

    /// Append or fsync failed
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StorageErrorCode::MutantStorageWriteFailed, message)
        }
    }

    /// Write refused without an underlying I/O error
    pub fn write_failed_no_source(message: impl Into<String>) -> Self {
        Self::new(StorageErrorCode::MutantStorageWriteFailed, message)
    }

    /// Read failed
    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StorageErrorCode::MutantStorageReadFailed, message)
        }
    }

    /// Data corruption at a byte offset in the store file
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            details: Some(format!("byte_offset: {}", offset)),
            ..Self::new(StorageErrorCode::MutantDataCorruption, reason)
        }
    }

    /// A lock guarding store state was poisoned by a panicking writer
    pub fn lock_poisoned(what: &str) -> Self {
        Self::new(
            StorageErrorCode::MutantStorageIoError,
            format!("{} lock poisoned", what),
        )
    }

    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether this error requires process termination
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StorageErrorCode::MutantStorageIoError.code(), "MUTANT_STORAGE_IO_ERROR");
        assert_eq!(
            StorageErrorCode::MutantStorageWriteFailed.code(),
            "MUTANT_STORAGE_WRITE_FAILED"
        );
        assert_eq!(
            StorageErrorCode::MutantStorageReadFailed.code(),
            "MUTANT_STORAGE_READ_FAILED"
        );
        assert_eq!(StorageErrorCode::MutantDataCorruption.code(), "MUTANT_DATA_CORRUPTION");
    }

    #[test]
    fn test_only_corruption_is_fatal() {
        assert!(StorageError::corruption_at_offset(0, "bad crc").is_fatal());
        assert!(!StorageError::write_failed_no_source("refused").is_fatal());
        assert!(!StorageError::lock_poisoned("index").is_fatal());
    }

    #[test]
    fn test_display_includes_offset() {
        let err = StorageError::corruption_at_offset(42, "checksum mismatch");
        let display = err.to_string();
        assert!(display.contains("FATAL"));
        assert!(display.contains("MUTANT_DATA_CORRUPTION"));
        assert!(display.contains("checksum mismatch"));
        assert!(display.contains("byte_offset: 42"));
    }

    #[test]
    fn test_source_preserved() {
        use std::error::Error;

        let err = StorageError::write_failed("disk full", io::Error::new(io::ErrorKind::Other, "ENOSPC"));
        assert!(err.source().is_some());
    }
}
