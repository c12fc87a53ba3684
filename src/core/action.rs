//! Action history.
//!
//! Each game records the entry-point calls it receives, in order. Replaying
//! the same actions against a game built from the same seed reproduces the
//! same table.

use serde::{Deserialize, Serialize};

/// A recorded action with its position in the game's input sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord<A> {
    /// The action taken.
    pub action: A,

    /// Zero-based position in the game's action sequence.
    pub sequence: u32,
}

impl<A> ActionRecord<A> {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: A, sequence: u32) -> Self {
        Self { action, sequence }
    }
}
