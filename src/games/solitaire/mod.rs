//! Klondike Solitaire.
//!
//! - `Layout`: stock, waste, four foundations, seven tableau columns
//! - `Selection`: the single picked-up source
//! - `validator`: pure placement rules
//! - `Solitaire`: move executor, entry points, win status
//!
//! Draw one card at a time, unlimited passes through the stock, and any
//! face-up card (including a foundation top) may be moved back into play.

mod game;
mod layout;
mod pile_ref;
mod selection;
pub mod validator;

pub use game::{MoveOutcome, Solitaire, SolitaireAction, SolitaireBuilder, SolitaireConfig, SolitaireSnapshot};
pub use layout::{DrawResult, Layout, LayoutBuilder};
pub use pile_ref::{Destination, PileRef, FOUNDATION_COUNT, TABLEAU_COLUMNS};
pub use selection::{Selection, SelectionChange};
