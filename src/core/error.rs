//! Error type shared by every game core.
//!
//! Illegal moves are not errors; entry points report them as an outcome.
//! `GameError` covers malformed input the view layer should never send.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A pile index, card offset, or board coordinate that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Builder parameters that cannot produce a playable game.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Snapshot bytes could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Snapshot(err.to_string())
    }
}
