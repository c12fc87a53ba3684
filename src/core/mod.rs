//! Core building blocks shared by every game: cards, RNG, errors, history.

pub mod card;
pub mod rng;
pub mod error;
pub mod action;

pub use card::{Card, Color, Suit, ACE, DECK_SIZE, KING, RANKS_PER_SUIT};
pub use rng::{GameRng, GameRngState};
pub use error::{GameError, Result};
pub use action::ActionRecord;
