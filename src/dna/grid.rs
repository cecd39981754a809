//! Immutable NxN DNA grid and its canonical key.

use std::fmt;

use super::errors::{GridError, GridResult};

/// Length of a qualifying run, and therefore the smallest usable grid side.
pub const RUN_LENGTH: usize = 4;

/// Separator used to join rows into the canonical key.
///
/// Not a member of the base alphabet, so distinct grids never collide.
pub const KEY_SEPARATOR: char = ',';

/// A validated square matrix of nucleotide bases.
///
/// Rows are held as raw bytes for constant-time cell access. Identity is
/// content only: two grids with the same rows produce the same [`key`](Self::key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnaGrid {
    rows: Vec<Vec<u8>>,
    key: String,
}

impl DnaGrid {
    /// Build a grid from its rows, top to bottom.
    ///
    /// Only the shape is checked here (N >= 4, every row of length N).
    /// Alphabet checks belong to [`super::validate_dna`].
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> GridResult<Self> {
        let size = rows.len();
        if size < RUN_LENGTH {
            return Err(GridError::TooSmall {
                min: RUN_LENGTH,
                actual: size,
            });
        }

        let mut cells = Vec::with_capacity(size);
        for (index, row) in rows.iter().enumerate() {
            let bytes = row.as_ref().as_bytes();
            if bytes.len() != size {
                return Err(GridError::RaggedRow {
                    row: index,
                    expected: size,
                    actual: bytes.len(),
                });
            }
            cells.push(bytes.to_vec());
        }

        let key = rows
            .iter()
            .map(|r| r.as_ref())
            .collect::<Vec<_>>()
            .join(&KEY_SEPARATOR.to_string());

        Ok(Self { rows: cells, key })
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Symbol at (row, col). Caller guarantees both are `< size()`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> u8 {
        self.rows[row][col]
    }

    /// Canonical lookup key used by the cache and the store.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for DnaGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", String::from_utf8_lossy(row))?;
        }
        Ok(())
    }
}
