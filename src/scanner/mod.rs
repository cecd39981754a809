//! Sequence detection
//!
//! Pure, CPU-only scan of a [`crate::dna::DnaGrid`] for runs of four
//! identical bases in the four straight-line directions.

mod direction;
mod scanner;

pub use direction::Direction;
pub use scanner::{ScanReport, SequenceScanner, QUALIFYING_RUNS};
