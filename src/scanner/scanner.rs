//! Sequence scanner
//!
//! Decides whether a grid holds more than one run of four identical bases.
//!
//! Cells are visited row-major. On each cell that has not been claimed by an
//! earlier run, the horizontal, vertical and diagonal tests are tried in that
//! order; the diagonal test tries down-right before down-left. A hit claims
//! all four cells. Any later test on a claimed cell is skipped, including the
//! remaining tests on the cell that was just claimed, so two runs that start
//! from the same cell count once.
//!
//! The scan stops as soon as the second run is confirmed.

use crate::dna::DnaGrid;

use super::direction::Direction;

/// Runs needed for a grid to qualify.
pub const QUALIFYING_RUNS: usize = 2;

/// Outcome of a single scan, with the counters needed to audit early exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Whether the grid holds more than one run.
    pub qualifies: bool,
    /// Runs counted before the scan stopped.
    pub runs_found: usize,
    /// Cells entered before the scan stopped.
    pub cells_visited: usize,
}

/// Row-major claimed-cell bitmap for one scan.
struct Claims {
    size: usize,
    cells: Vec<bool>,
}

impl Claims {
    fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    fn is_claimed(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.size + col]
    }

    fn claim(&mut self, run: &[(usize, usize)]) {
        for &(row, col) in run {
            self.cells[row * self.size + col] = true;
        }
    }
}

/// Stateless scanner; one value can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceScanner;

impl SequenceScanner {
    pub fn new() -> Self {
        Self
    }

    /// True iff the grid holds more than one run.
    pub fn evaluate(&self, grid: &DnaGrid) -> bool {
        self.scan(grid).qualifies
    }

    /// Scan the grid and report how far the scan went.
    pub fn scan(&self, grid: &DnaGrid) -> ScanReport {
        let size = grid.size();
        let mut claims = Claims::new(size);
        let mut runs_found = 0;
        let mut cells_visited = 0;

        for row in 0..size {
            for col in 0..size {
                cells_visited += 1;

                if self.try_claim(grid, &mut claims, row, col, &[Direction::Horizontal]) {
                    runs_found += 1;
                }
                if self.try_claim(grid, &mut claims, row, col, &[Direction::Vertical]) {
                    runs_found += 1;
                }
                if self.try_claim(
                    grid,
                    &mut claims,
                    row,
                    col,
                    &[Direction::DiagonalDownRight, Direction::DiagonalDownLeft],
                ) {
                    runs_found += 1;
                }

                if runs_found >= QUALIFYING_RUNS {
                    return ScanReport {
                        qualifies: true,
                        runs_found,
                        cells_visited,
                    };
                }
            }
        }

        ScanReport {
            qualifies: false,
            runs_found,
            cells_visited,
        }
    }

    /// One test on (row, col): skipped if the cell is claimed, otherwise the
    /// first direction in `directions` that yields a run claims its cells.
    fn try_claim(
        &self,
        grid: &DnaGrid,
        claims: &mut Claims,
        row: usize,
        col: usize,
        directions: &[Direction],
    ) -> bool {
        if claims.is_claimed(row, col) {
            return false;
        }
        for direction in directions {
            if let Some(run) = direction.run_at(grid, row, col) {
                claims.claim(&run);
                return true;
            }
        }
        false
    }
}
