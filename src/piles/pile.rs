//! Ordered card pile.
//!
//! Index 0 is the bottom of the pile, the last index is the top. Every
//! Solitaire pile (stock, waste, foundation, tableau column) is a `Pile`;
//! what differs between them is which operations the rules allow.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Card;

/// Cards lifted off a pile together.
///
/// A tableau run is at most King..Ace, so thirteen slots avoid the heap.
pub type Run = SmallVec<[Card; 13]>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pile from cards, bottom first.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in order, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Get the top card (last in the vec).
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove and return the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Append cards on top, preserving their order.
    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    /// Cards from `offset` to the top. Empty if `offset` is past the end.
    #[must_use]
    pub fn run_from(&self, offset: usize) -> &[Card] {
        self.cards.get(offset..).unwrap_or(&[])
    }

    /// Remove and return every card from `offset` to the top.
    pub fn split_off(&mut self, offset: usize) -> Run {
        if offset >= self.cards.len() {
            return Run::new();
        }
        self.cards.drain(offset..).collect()
    }

    /// Remove every card, bottom first.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    /// Turn the top card face-up if it is face-down.
    ///
    /// Returns the card if it was flipped.
    pub fn reveal_top(&mut self) -> Option<Card> {
        let top = self.cards.last_mut()?;
        if top.face_up {
            return None;
        }
        top.face_up = true;
        Some(*top)
    }

    /// Index of the first card of the trailing face-up run.
    ///
    /// Equals `len()` when the pile is empty or its top card is face-down.
    #[must_use]
    pub fn face_up_start(&self) -> usize {
        self.cards
            .iter()
            .rposition(|c| !c.face_up)
            .map_or(0, |i| i + 1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl<'a> IntoIterator for &'a Pile {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
