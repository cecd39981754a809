//! # DNA Errors
//!
//! Error types for grid construction and input validation.

use thiserror::Error;

/// Result type for grid construction
pub type GridResult<T> = Result<T, GridError>;

/// Shape violations detected while building a [`super::DnaGrid`].
///
/// The classifier assumes validated input; these exist so that a malformed
/// grid fails fast instead of panicking on an out-of-bounds index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Fewer rows than the minimum run length
    #[error("Grid must have at least {min} rows, got {actual}")]
    TooSmall { min: usize, actual: usize },

    /// A row whose length differs from the row count
    #[error("Row {row} has length {actual}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Input rejected at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No `dna` rows supplied
    #[error("DNA sequence is empty")]
    Empty,

    /// Fewer than 4 rows
    #[error("DNA must be at least 4x4, got {0} rows")]
    TooSmall(usize),

    /// Matrix is not NxN
    #[error("DNA must be an NxN matrix: row {row} has length {actual}, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Row contains something other than A, T, C, G
    #[error("DNA row {row} contains characters other than A, T, C, G")]
    InvalidBase { row: usize },
}

impl From<GridError> for ValidationError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::TooSmall { actual, .. } => ValidationError::TooSmall(actual),
            GridError::RaggedRow {
                row,
                expected,
                actual,
            } => ValidationError::NotSquare {
                row,
                expected,
                actual,
            },
        }
    }
}
