//! Run directions and their bounds rules.

use crate::dna::{DnaGrid, RUN_LENGTH};

/// A straight-line direction a run can extend in from its starting cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right along a row
    Horizontal,
    /// Top to bottom along a column
    Vertical,
    /// Down and to the right
    DiagonalDownRight,
    /// Down and to the left
    DiagonalDownLeft,
}

impl Direction {
    /// Row/column step for one cell along this direction.
    pub fn step(&self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }

    /// Cells of a run starting at (row, col), or `None` if any falls outside
    /// an NxN grid.
    pub fn cells(&self, row: usize, col: usize, size: usize) -> Option<[(usize, usize); RUN_LENGTH]> {
        let (dr, dc) = self.step();
        let reach = (RUN_LENGTH - 1) as isize;

        let last_row = row as isize + dr * reach;
        let last_col = col as isize + dc * reach;
        if last_row < 0 || last_col < 0 || last_row >= size as isize || last_col >= size as isize {
            return None;
        }

        let mut cells = [(0usize, 0usize); RUN_LENGTH];
        for (i, cell) in cells.iter_mut().enumerate() {
            let i = i as isize;
            *cell = ((row as isize + dr * i) as usize, (col as isize + dc * i) as usize);
        }
        Some(cells)
    }

    /// Cells of a run in this direction starting at (row, col), if all four
    /// hold the same base.
    pub fn run_at(&self, grid: &DnaGrid, row: usize, col: usize) -> Option<[(usize, usize); RUN_LENGTH]> {
        let cells = self.cells(row, col, grid.size())?;
        let base = grid.at(row, col);
        if cells.iter().all(|&(r, c)| grid.at(r, c) == base) {
            Some(cells)
        } else {
            None
        }
    }
}
