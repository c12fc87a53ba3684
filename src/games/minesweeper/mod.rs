//! Minesweeper.
//!
//! A rectangular board with randomly placed mines. Opening a cell shows how
//! many of its eight neighbours are mined; opening a zero floods outward.
//! Open every safe cell to win, open a mine to lose.
//!
//! Defaults to the classic 10x10 board with 10 mines.

mod board;
mod game;

pub use board::{Board, Cell, Neighbors};
pub use game::{Minesweeper, MinesweeperBuilder, MinesweeperConfig, SweepAction, SweepOutcome};
