//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What actions are legal
//! - How actions modify state
//! - Win/loss conditions

use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Where a game stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Play continues.
    #[default]
    InProgress,
    /// The player met the win condition.
    Won,
    /// The player hit a losing condition (Minesweeper only).
    Lost,
}

impl GameStatus {
    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec once the game is over
/// - `apply`: Must be deterministic so recorded actions replay exactly
/// - `apply`: Illegal-but-well-formed actions are `Ok`; only malformed
///   references are `Err`
pub trait RulesEngine {
    /// The input vocabulary of the game.
    type Action: Clone;

    /// What `apply` reports back to the caller.
    type Outcome;

    /// Enumerate all actions that would change the game state.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Apply an action to the game.
    fn apply(&mut self, action: &Self::Action) -> Result<Self::Outcome>;

    /// Current status.
    fn status(&self) -> GameStatus;

    // === Convenience Methods ===

    /// Check if the game is over.
    fn is_terminal(&self) -> bool {
        self.status().is_over()
    }

    /// Apply a sequence of actions in order, stopping at the first error.
    fn replay<'a, I>(&mut self, actions: I) -> Result<Vec<Self::Outcome>>
    where
        I: IntoIterator<Item = &'a Self::Action>,
        Self::Action: 'a,
    {
        actions.into_iter().map(|action| self.apply(action)).collect()
    }
}
