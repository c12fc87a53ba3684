//! Game implementations.
//!
//! - `solitaire`: Klondike, draw one
//! - `minesweeper`: classic mine-clearing grid

pub mod minesweeper;
pub mod solitaire;
