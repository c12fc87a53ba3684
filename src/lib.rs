//! # parlor
//!
//! Deterministic rules cores for casual single-player games.
//!
//! Each game is a plain struct that owns its state and exposes a few entry
//! points a view layer calls on user input (click, drag-release, timer).
//! Nothing here renders; the caller reads piles, boards, and status back
//! and redraws.
//!
//! ## Design Principles
//!
//! 1. **Seeded**: Every shuffle and mine placement comes from a `GameRng`,
//!    so a seed plus the recorded actions replays a game exactly.
//!
//! 2. **Silent rejections**: An illegal move is a normal outcome
//!    (`MoveOutcome::Rejected`), not an error. Only references to piles or
//!    cells that do not exist are `Err(GameError::InvalidReference)`.
//!
//! 3. **One mutator**: Entry points take `&mut self` and run to completion.
//!
//! ## Modules
//!
//! - `core`: Cards, RNG, errors, action history
//! - `piles`: Ordered card piles
//! - `rules`: `RulesEngine` trait and `GameStatus`
//! - `games`: Klondike Solitaire and Minesweeper
//!
//! ```
//! use parlor::games::solitaire::{PileRef, Solitaire};
//! use parlor::rules::GameStatus;
//!
//! let mut game = Solitaire::new(42);
//! game.draw_stock();
//! game.select_or_move(PileRef::Waste).unwrap();
//!
//! assert_eq!(game.total_cards(), 52);
//! assert_eq!(game.status(), GameStatus::InProgress);
//! ```

pub mod core;
pub mod piles;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{ActionRecord, Card, Color, GameError, GameRng, GameRngState, Result, Suit};

pub use crate::piles::{Pile, Run};

pub use crate::rules::{GameStatus, RulesEngine};

pub use crate::games::solitaire::{
    Destination, Layout, MoveOutcome, PileRef, Solitaire, SolitaireAction, SolitaireBuilder,
    SolitaireSnapshot,
};

pub use crate::games::minesweeper::{Minesweeper, MinesweeperBuilder, MinesweeperConfig, SweepAction, SweepOutcome};
