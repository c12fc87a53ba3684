//! Move legality rules.
//!
//! Pure functions over card slices; nothing here mutates the table. The
//! kind of pile a run comes from never affects whether it may land.

use crate::core::{Card, ACE, KING};

use super::pile_ref::Destination;

/// `moving` is the opposite colour of `base` and exactly one rank below it.
#[must_use]
pub fn can_stack_on(moving: &Card, base: &Card) -> bool {
    moving.color() != base.color() && moving.rank + 1 == base.rank
}

/// Whether a run whose first card is `moving_first` may land on `column`.
///
/// Empty columns take only a King.
#[must_use]
pub fn legal_on_tableau(moving_first: &Card, column: &[Card]) -> bool {
    match column.last() {
        None => moving_first.rank == KING,
        Some(top) => can_stack_on(moving_first, top),
    }
}

/// Whether a single card may land on a foundation pile.
///
/// Empty foundations take only an Ace; otherwise same suit, one rank up.
#[must_use]
pub fn legal_on_foundation(card: &Card, pile: &[Card]) -> bool {
    match pile.last() {
        None => card.rank == ACE,
        Some(top) => card.suit == top.suit && card.rank == top.rank + 1,
    }
}

/// Whether `run` may land on `dest`, whose current cards are `dest_cards`.
///
/// Foundations accept exactly one card. An empty run is never legal.
#[must_use]
pub fn legal_move(run: &[Card], dest: Destination, dest_cards: &[Card]) -> bool {
    match (dest, run) {
        (_, []) => false,
        (Destination::Foundation(_), [card]) => legal_on_foundation(card, dest_cards),
        (Destination::Foundation(_), _) => false,
        (Destination::Tableau(_), [first, ..]) => legal_on_tableau(first, dest_cards),
    }
}
