//! Playing cards: suits, colours, ranks.
//!
//! A card's identity is its `(suit, rank)` pair; `face_up` is table state
//! that only the pile model and the move executor change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Number of ranks per suit (Ace through King).
pub const RANKS_PER_SUIT: u8 = 13;

/// Rank of an Ace.
pub const ACE: u8 = 1;

/// Rank of a King.
pub const KING: u8 = 13;

/// Card colour. Alternating colours are what tableau stacking checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card suit, in deck-construction order (♠ ♥ ♦ ♣).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All suits in deck-construction order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Spades | Suit::Clubs => Color::Black,
        }
    }

    /// Unicode suit symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single playing card.
///
/// ```
/// use parlor::core::{Card, Suit};
///
/// let card = Card::face_up(Suit::Hearts, 10);
/// assert_eq!(card.to_string(), "10♥");
/// assert!(card.is_red());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    pub suit: Suit,
    /// 1 (Ace) ..= 13 (King).
    pub rank: u8,
    pub face_up: bool,
}

/// Wire form of a `Card`, checked on the way in.
#[derive(Deserialize)]
struct RawCard {
    suit: Suit,
    rank: u8,
    face_up: bool,
}

impl TryFrom<RawCard> for Card {
    type Error = String;

    fn try_from(raw: RawCard) -> std::result::Result<Self, Self::Error> {
        let card = Card {
            suit: raw.suit,
            rank: raw.rank,
            face_up: raw.face_up,
        };
        if card.has_valid_rank() {
            Ok(card)
        } else {
            Err(format!("rank {} outside {}-{}", raw.rank, ACE, KING))
        }
    }
}

impl Card {
    /// Create a face-down card.
    ///
    /// Panics if `rank` is outside `1..=13`.
    #[must_use]
    pub fn new(suit: Suit, rank: u8) -> Self {
        assert!((ACE..=KING).contains(&rank), "Rank must be 1-13, got {}", rank);
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    /// Create a face-up card.
    #[must_use]
    pub fn face_up(suit: Suit, rank: u8) -> Self {
        Self::new(suit, rank).turned_up()
    }

    /// Copy of this card turned face-up.
    #[must_use]
    pub const fn turned_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    /// Copy of this card turned face-down.
    #[must_use]
    pub const fn turned_down(mut self) -> Self {
        self.face_up = false;
        self
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    #[must_use]
    pub const fn is_red(&self) -> bool {
        matches!(self.color(), Color::Red)
    }

    /// Whether `rank` is an Ace through King.
    #[must_use]
    pub const fn has_valid_rank(&self) -> bool {
        self.rank >= ACE && self.rank <= KING
    }

    /// Whether two cards are the same physical card, ignoring orientation.
    #[must_use]
    pub fn same_card(&self, other: &Card) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }

    /// Position of this card in `Card::deck()` order (0..52).
    #[must_use]
    pub fn deck_index(&self) -> usize {
        self.suit as usize * RANKS_PER_SUIT as usize + (self.rank - 1) as usize
    }

    /// Short rank label: A, 2-10, J, Q, K.
    #[must_use]
    pub fn rank_label(&self) -> &'static str {
        const LABELS: [&str; 13] = ["A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K"];
        LABELS[(self.rank - 1) as usize]
    }

    /// A fresh 52-card deck, face-down, suit-major in `Suit::ALL` order.
    #[must_use]
    pub fn deck() -> Vec<Card> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| (ACE..=KING).map(move |rank| Card::new(suit, rank)))
            .collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_label(), self.suit)
    }
}
