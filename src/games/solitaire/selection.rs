//! Single-slot selection tracker.
//!
//! Holds at most one picked-up source. Choosing the same source twice is a
//! deselect. Whether a source may be picked at all (face-down cards, empty
//! piles) depends on the table and is decided by the controller.

use log::trace;
use serde::{Deserialize, Serialize};

use super::pile_ref::PileRef;

/// Result of offering a source to the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(PileRef),
    Deselected(PileRef),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    current: Option<PileRef>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self) -> Option<PileRef> {
        self.current
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Select `source`, or deselect if it is already the selection.
    pub fn toggle(&mut self, source: PileRef) -> SelectionChange {
        if self.current == Some(source) {
            self.current = None;
            trace!("deselected {}", source);
            SelectionChange::Deselected(source)
        } else {
            self.replace(source);
            SelectionChange::Selected(source)
        }
    }

    /// Make `source` the selection regardless of what was held.
    pub fn replace(&mut self, source: PileRef) {
        trace!("selected {}", source);
        self.current = Some(source);
    }

    /// Drop the selection, returning what was held.
    pub fn clear(&mut self) -> Option<PileRef> {
        self.current.take()
    }

    /// Whether the tableau card at `column[index]` is part of the selected run.
    #[must_use]
    pub fn covers(&self, column: usize, index: usize) -> bool {
        matches!(
            self.current,
            Some(PileRef::Tableau { column: c, offset }) if c == column && index >= offset
        )
    }
}
