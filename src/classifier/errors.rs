//! # Classifier Errors

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for classification
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Classification either yields a definitive outcome or one of these.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The store failed a lookup or a write; surfaced unchanged.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),
}

impl ClassifyError {
    /// Underlying storage error.
    pub fn storage_error(&self) -> &StorageError {
        match self {
            ClassifyError::StoreUnavailable(e) => e,
        }
    }
}
