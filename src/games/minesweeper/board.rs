//! Minesweeper board: a row-major grid of cells.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::GameRng;

/// A single square of the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    /// Mines among the eight neighbours; 0 for mined cells.
    pub adjacent: u8,
    pub revealed: bool,
    pub flagged: bool,
}

/// Up to eight in-bounds neighbour coordinates.
pub type Neighbors = SmallVec<[(usize, usize); 8]>;

#[rustfmt::skip]
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// A board with no mines.
    #[must_use]
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        }
    }

    /// A board with `mines` mines at random distinct cells.
    ///
    /// Callers guarantee `mines < rows * cols`.
    pub fn generate(rows: usize, cols: usize, mines: usize, rng: &mut GameRng) -> Self {
        let mut board = Self::empty(rows, cols);
        let mut placed = 0;
        while placed < mines {
            let row = rng.gen_range_usize(0..rows);
            let col = rng.gen_range_usize(0..cols);
            let cell = &mut board.cells[row * cols + col];
            if !cell.mine {
                cell.mine = true;
                placed += 1;
            }
        }
        board.compute_adjacency();
        board
    }

    /// A board with mines at exactly the given coordinates.
    ///
    /// Coordinates outside the board are skipped.
    #[must_use]
    pub fn with_mines(rows: usize, cols: usize, mines: &[(usize, usize)]) -> Self {
        let mut board = Self::empty(rows, cols);
        for &(row, col) in mines {
            if let Some(cell) = board.cell_mut(row, col) {
                cell.mine = true;
            }
        }
        board.compute_adjacency();
        board
    }

    fn compute_adjacency(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let count = if self.cells[row * self.cols + col].mine {
                    0
                } else {
                    self.neighbors(row, col)
                        .iter()
                        .filter(|&&(r, c)| self.cells[r * self.cols + c].mine)
                        .count() as u8
                };
                self.cells[row * self.cols + col].adjacent = count;
            }
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.in_bounds(row, col) {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if self.in_bounds(row, col) {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// In-bounds neighbours of `(row, col)`.
    #[must_use]
    pub fn neighbors(&self, row: usize, col: usize) -> Neighbors {
        DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                self.in_bounds(r, c).then_some((r, c))
            })
            .collect()
    }

    #[must_use]
    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|c| c.mine).count()
    }

    /// Coordinates of every mine, row-major.
    pub fn mines(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.mine)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    /// Rows of cells, top first.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols.max(1))
    }
}
