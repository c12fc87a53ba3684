//! Descriptors for piles and cards on the Solitaire table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of foundation piles.
pub const FOUNDATION_COUNT: usize = 4;

/// Number of tableau columns.
pub const TABLEAU_COLUMNS: usize = 7;

/// A place on the table a player can point at or pick up from.
///
/// For `Tableau`, `offset` is the index of the first card of the moving
/// run; every card from `offset` to the top of the column moves with it.
/// `Tableau { column, offset: 0 }` on an empty column refers to the empty
/// column itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileRef {
    Stock,
    Waste,
    Foundation(usize),
    Tableau { column: usize, offset: usize },
}

impl PileRef {
    /// Shorthand for a tableau reference.
    #[must_use]
    pub const fn tableau(column: usize, offset: usize) -> Self {
        PileRef::Tableau { column, offset }
    }

    /// Whether this reference and `dest` name the same physical pile.
    #[must_use]
    pub fn same_pile(&self, dest: Destination) -> bool {
        match (*self, dest) {
            (PileRef::Foundation(a), Destination::Foundation(b)) => a == b,
            (PileRef::Tableau { column, .. }, Destination::Tableau(b)) => column == b,
            _ => false,
        }
    }
}

impl fmt::Display for PileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileRef::Stock => write!(f, "stock"),
            PileRef::Waste => write!(f, "waste"),
            PileRef::Foundation(i) => write!(f, "foundation {}", i),
            PileRef::Tableau { column, offset } => write!(f, "tableau {}[{}]", column, offset),
        }
    }
}

/// A pile a moving run can land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    Foundation(usize),
    Tableau(usize),
}

impl Destination {
    /// Every destination on the table, foundations first.
    pub fn all() -> impl Iterator<Item = Destination> {
        (0..FOUNDATION_COUNT)
            .map(Destination::Foundation)
            .chain((0..TABLEAU_COLUMNS).map(Destination::Tableau))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Foundation(i) => write!(f, "foundation {}", i),
            Destination::Tableau(i) => write!(f, "tableau {}", i),
        }
    }
}
