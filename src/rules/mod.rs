//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal actions for the current position
//! - How actions modify state
//! - Win/loss conditions
//!
//! Callers (view layers, replay harnesses, tests) drive any game through
//! this trait without knowing its pile or board layout.

pub mod engine;

pub use engine::{GameStatus, RulesEngine};
