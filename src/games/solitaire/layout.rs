//! The Klondike table: stock, waste, four foundations, seven tableau columns.
//!
//! `Layout` owns every card in play. Only two entry points touch the stock
//! and waste (`deal`, `draw_from_stock`); foundations and tableau columns
//! change only through the move executor in `game.rs`, which goes through
//! `take_run` / `place` / `reveal_tableau_top`.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Card, GameError, GameRng, Result, DECK_SIZE};
use crate::piles::{Pile, Run};

use super::pile_ref::{Destination, PileRef, FOUNDATION_COUNT, TABLEAU_COLUMNS};
use super::validator;

/// What a stock click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawResult {
    /// The top stock card moved to the waste, face-up.
    Drew(Card),
    /// The stock was empty; this many waste cards went back face-down.
    Recycled(usize),
    /// Stock and waste were both empty.
    Empty,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    stock: Pile,
    waste: Pile,
    foundations: [Pile; FOUNDATION_COUNT],
    tableau: [Pile; TABLEAU_COLUMNS],
}

impl Layout {
    /// Shuffle a fresh deck and deal a new game.
    ///
    /// Cards come off the end of the shuffled deck. Column `i` gets `i + 1`
    /// cards with only the last face-up; the remaining 24 form the stock.
    pub fn deal(rng: &mut GameRng) -> Self {
        let mut deck = Card::deck();
        rng.shuffle(&mut deck);

        let mut layout = Self::default();
        for column in 0..TABLEAU_COLUMNS {
            for row in 0..=column {
                if let Some(card) = deck.pop() {
                    let card = if row == column { card.turned_up() } else { card };
                    layout.tableau[column].push(card);
                }
            }
        }
        layout.stock = Pile::from_cards(deck);

        debug!("dealt new game: {} cards in stock", layout.stock.len());
        layout
    }

    /// Start a layout by hand. Cards not placed anywhere go to the stock.
    #[must_use]
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::default()
    }

    /// Turn the top stock card onto the waste, or recycle the waste.
    ///
    /// Recycling puts the waste back face-down in reverse order, so the
    /// first card drawn on the previous pass is drawn first again.
    pub fn draw_from_stock(&mut self) -> DrawResult {
        if let Some(card) = self.stock.pop() {
            let card = card.turned_up();
            self.waste.push(card);
            debug!("drew {} from stock", card);
            return DrawResult::Drew(card);
        }

        if self.waste.is_empty() {
            return DrawResult::Empty;
        }

        let recycled: Vec<Card> = self
            .waste
            .take_all()
            .into_iter()
            .rev()
            .map(Card::turned_down)
            .collect();
        let count = recycled.len();
        self.stock = Pile::from_cards(recycled);
        debug!("recycled {} waste cards into stock", count);
        DrawResult::Recycled(count)
    }

    // === Accessors ===

    #[must_use]
    pub fn stock(&self) -> &Pile {
        &self.stock
    }

    #[must_use]
    pub fn waste(&self) -> &Pile {
        &self.waste
    }

    #[must_use]
    pub fn foundation(&self, index: usize) -> Option<&Pile> {
        self.foundations.get(index)
    }

    #[must_use]
    pub fn foundations(&self) -> &[Pile] {
        &self.foundations
    }

    #[must_use]
    pub fn tableau(&self, column: usize) -> Option<&Pile> {
        self.tableau.get(column)
    }

    #[must_use]
    pub fn tableaus(&self) -> &[Pile] {
        &self.tableau
    }

    /// Sum of foundation pile lengths.
    #[must_use]
    pub fn foundation_count(&self) -> usize {
        self.foundations.iter().map(Pile::len).sum()
    }

    /// Every card on the table. Always `DECK_SIZE`.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.stock.len()
            + self.waste.len()
            + self.foundation_count()
            + self.tableau.iter().map(Pile::len).sum::<usize>()
    }

    /// Check the table invariants: every card of the deck exactly once,
    /// stock face-down, waste and foundations face-up, and each foundation a
    /// same-suit run up from the Ace.
    pub fn validate(&self) -> Result<()> {
        let mut seen = [false; DECK_SIZE];
        let all = self
            .stock
            .iter()
            .chain(self.waste.iter())
            .chain(self.foundations.iter().flat_map(Pile::iter))
            .chain(self.tableau.iter().flat_map(Pile::iter));
        for card in all {
            if !card.has_valid_rank() {
                return Err(GameError::InvalidConfig(format!("card with rank {}", card.rank)));
            }
            let slot = &mut seen[card.deck_index()];
            if *slot {
                return Err(GameError::InvalidConfig(format!("{} placed twice", card)));
            }
            *slot = true;
        }

        let total = self.total_cards();
        if total != DECK_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "table holds {} cards, expected {}",
                total, DECK_SIZE
            )));
        }

        if let Some(card) = self.stock.iter().find(|card| card.face_up) {
            return Err(GameError::InvalidConfig(format!("{} face-up in stock", card)));
        }
        if let Some(card) = self.waste.iter().find(|card| !card.face_up) {
            return Err(GameError::InvalidConfig(format!("{} face-down on waste", card)));
        }

        for (index, pile) in self.foundations.iter().enumerate() {
            for (depth, card) in pile.iter().enumerate() {
                if !card.face_up || !validator::legal_on_foundation(card, &pile.cards()[..depth]) {
                    return Err(GameError::InvalidConfig(format!(
                        "{} cannot sit on foundation {} at depth {}",
                        card, index, depth
                    )));
                }
            }
        }

        Ok(())
    }

    // === Descriptor checks ===

    /// Fail on a reference to a pile or card that does not exist.
    pub fn check_ref(&self, source: PileRef) -> Result<()> {
        match source {
            PileRef::Stock | PileRef::Waste => Ok(()),
            PileRef::Foundation(index) => self.check_foundation(index),
            PileRef::Tableau { column, offset } => {
                let pile = self.tableau.get(column).ok_or_else(|| {
                    GameError::InvalidReference(format!(
                        "tableau column {} (have {})",
                        column, TABLEAU_COLUMNS
                    ))
                })?;
                if offset < pile.len() || (offset == 0 && pile.is_empty()) {
                    Ok(())
                } else {
                    Err(GameError::InvalidReference(format!(
                        "tableau {} offset {} (column has {} cards)",
                        column,
                        offset,
                        pile.len()
                    )))
                }
            }
        }
    }

    /// Fail on a destination that does not exist.
    pub fn check_destination(&self, dest: Destination) -> Result<()> {
        match dest {
            Destination::Foundation(index) => self.check_foundation(index),
            Destination::Tableau(column) if column < TABLEAU_COLUMNS => Ok(()),
            Destination::Tableau(column) => Err(GameError::InvalidReference(format!(
                "tableau column {} (have {})",
                column, TABLEAU_COLUMNS
            ))),
        }
    }

    fn check_foundation(&self, index: usize) -> Result<()> {
        if index < FOUNDATION_COUNT {
            Ok(())
        } else {
            Err(GameError::InvalidReference(format!(
                "foundation {} (have {})",
                index, FOUNDATION_COUNT
            )))
        }
    }

    // === Move plumbing ===

    /// The cards that would move if `source` were picked up.
    ///
    /// Waste and foundation sources yield their top card; tableau sources
    /// yield the suffix from `offset`. Stock never yields a run.
    #[must_use]
    pub fn moving_run(&self, source: PileRef) -> &[Card] {
        match source {
            PileRef::Stock => &[],
            PileRef::Waste => top_slice(&self.waste),
            PileRef::Foundation(index) => self.foundations.get(index).map(top_slice).unwrap_or_default(),
            PileRef::Tableau { column, offset } => self
                .tableau
                .get(column)
                .map(|pile| pile.run_from(offset))
                .unwrap_or_default(),
        }
    }

    /// Current cards of a destination pile.
    #[must_use]
    pub fn destination_cards(&self, dest: Destination) -> &[Card] {
        let pile = match dest {
            Destination::Foundation(index) => self.foundations.get(index),
            Destination::Tableau(column) => self.tableau.get(column),
        };
        pile.map(Pile::cards).unwrap_or_default()
    }

    /// Lift the moving run off `source`.
    pub(crate) fn take_run(&mut self, source: PileRef) -> Run {
        let mut run = Run::new();
        match source {
            PileRef::Stock => {}
            PileRef::Waste => run.extend(self.waste.pop()),
            PileRef::Foundation(index) => {
                if let Some(pile) = self.foundations.get_mut(index) {
                    run.extend(pile.pop());
                }
            }
            PileRef::Tableau { column, offset } => {
                if let Some(pile) = self.tableau.get_mut(column) {
                    run = pile.split_off(offset);
                }
            }
        }
        run
    }

    /// Put a run on top of `dest`, in order.
    pub(crate) fn place(&mut self, dest: Destination, run: Run) {
        let pile = match dest {
            Destination::Foundation(index) => self.foundations.get_mut(index),
            Destination::Tableau(column) => self.tableau.get_mut(column),
        };
        if let Some(pile) = pile {
            pile.extend(run);
        }
    }

    /// Flip a tableau column's new top card face-up if it is face-down.
    pub(crate) fn reveal_tableau_top(&mut self, column: usize) -> Option<Card> {
        let card = self.tableau.get_mut(column)?.reveal_top()?;
        debug!("revealed {} on tableau {}", card, column);
        Some(card)
    }
}

fn top_slice(pile: &Pile) -> &[Card] {
    pile.run_from(pile.len().saturating_sub(1))
}

/// Hand-built table, for puzzles, tests, and restoring positions.
///
/// Waste and foundation cards are turned face-up; stock cards face-down;
/// tableau cards keep the orientation given.
#[derive(Clone, Debug, Default)]
pub struct LayoutBuilder {
    stock: Vec<Card>,
    waste: Vec<Card>,
    foundations: [Vec<Card>; FOUNDATION_COUNT],
    tableau: [Vec<Card>; TABLEAU_COLUMNS],
}

impl LayoutBuilder {
    /// Cards placed on top of the stock, bottom first.
    pub fn stock(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.stock.extend(cards.into_iter().map(Card::turned_down));
        self
    }

    pub fn waste(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.waste.extend(cards.into_iter().map(Card::turned_up));
        self
    }

    pub fn foundation(mut self, index: usize, cards: impl IntoIterator<Item = Card>) -> Self {
        assert!(index < FOUNDATION_COUNT, "Foundation index must be 0-3");
        self.foundations[index].extend(cards.into_iter().map(Card::turned_up));
        self
    }

    pub fn tableau(mut self, column: usize, cards: impl IntoIterator<Item = Card>) -> Self {
        assert!(column < TABLEAU_COLUMNS, "Tableau column must be 0-6");
        self.tableau[column].extend(cards);
        self
    }

    /// Finish the layout.
    ///
    /// Cards not placed anywhere go under the given stock cards in deck
    /// order. Fails if a card is placed twice or a foundation is not a
    /// same-suit run up from the Ace.
    pub fn build(self) -> Result<Layout> {
        let mut seen = [false; DECK_SIZE];
        let placed = self
            .stock
            .iter()
            .chain(&self.waste)
            .chain(self.foundations.iter().flatten())
            .chain(self.tableau.iter().flatten());
        for card in placed {
            if !card.has_valid_rank() {
                return Err(GameError::InvalidConfig(format!("card with rank {}", card.rank)));
            }
            let slot = &mut seen[card.deck_index()];
            if *slot {
                return Err(GameError::InvalidConfig(format!("{} placed twice", card)));
            }
            *slot = true;
        }

        let mut stock: Vec<Card> = Card::deck()
            .into_iter()
            .filter(|card| !seen[card.deck_index()])
            .collect();
        stock.extend(self.stock);

        let layout = Layout {
            stock: Pile::from_cards(stock),
            waste: Pile::from_cards(self.waste),
            foundations: self.foundations.map(Pile::from_cards),
            tableau: self.tableau.map(Pile::from_cards),
        };
        layout.validate()?;
        Ok(layout)
    }
}
