//! Pile model building blocks.
//!
//! - `Pile`: ordered card sequence (bottom first, top last)
//! - `Run`: cards lifted off a pile as a unit

pub mod pile;

pub use pile::{Pile, Run};
