//! Klondike Solitaire controller.
//!
//! `Solitaire` owns the table, the selection slot, and the RNG, and exposes
//! the four interaction entry points a view layer calls:
//!
//! - `new_game`: shuffle and re-deal
//! - `draw_stock`: stock click
//! - `select_or_move`: click on a card or pile
//! - `drop_onto`: drag-release onto a pile
//!
//! Every entry point runs to completion before returning. A rejected move is
//! an `Ok(MoveOutcome::Rejected)`, never an error; malformed references are
//! `Err(GameError::InvalidReference)`.

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{ActionRecord, Card, GameError, GameRng, GameRngState, Result, DECK_SIZE};
use crate::piles::Pile;
use crate::rules::{GameStatus, RulesEngine};

use super::layout::{DrawResult, Layout};
use super::pile_ref::{Destination, PileRef, FOUNDATION_COUNT};
use super::selection::{Selection, SelectionChange};
use super::validator;

/// Solitaire configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolitaireConfig {
    /// Seed for the shuffle stream. Every `new_game` continues this stream.
    pub seed: u64,
}

/// Player input, as recorded in the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolitaireAction {
    NewGame,
    DrawStock,
    Click(PileRef),
    Drop { carried: PileRef, dest: Destination },
    AutoSend(PileRef),
}

/// What an entry point did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A fresh game was dealt.
    Dealt,
    /// A stock card was turned onto the waste.
    Drew(Card),
    /// The waste went back into the stock.
    Recycled(usize),
    Selected(PileRef),
    Deselected,
    Moved {
        from: PileRef,
        to: Destination,
        cards: usize,
    },
    /// A move attempt that broke the rules. The selection is cleared.
    Rejected,
    /// Nothing to do (empty pile, finished game).
    NoOp,
}

impl MoveOutcome {
    /// Whether any card changed pile or orientation.
    #[must_use]
    pub fn changed_table(&self) -> bool {
        matches!(
            self,
            MoveOutcome::Dealt | MoveOutcome::Drew(_) | MoveOutcome::Recycled(_) | MoveOutcome::Moved { .. }
        )
    }
}

impl From<SelectionChange> for MoveOutcome {
    fn from(change: SelectionChange) -> Self {
        match change {
            SelectionChange::Selected(source) => MoveOutcome::Selected(source),
            SelectionChange::Deselected(_) => MoveOutcome::Deselected,
        }
    }
}

/// Klondike game.
#[derive(Clone, Debug)]
pub struct Solitaire {
    config: SolitaireConfig,
    layout: Layout,
    selection: Selection,
    rng: GameRng,
    history: Vector<ActionRecord<SolitaireAction>>,
}

/// Builder for creating a Solitaire game.
#[derive(Clone, Debug, Default)]
pub struct SolitaireBuilder {
    config: SolitaireConfig,
    layout: Option<Layout>,
}

impl SolitaireBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Start from a prepared layout instead of dealing.
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Build the game, dealing from the seed unless a layout was given.
    pub fn build(self) -> Solitaire {
        let mut rng = GameRng::new(self.config.seed);
        let layout = self.layout.unwrap_or_else(|| Layout::deal(&mut rng));

        Solitaire {
            config: self.config,
            layout,
            selection: Selection::new(),
            rng,
            history: Vector::new(),
        }
    }
}

impl Solitaire {
    /// Deal a game from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        SolitaireBuilder::new().seed(seed).build()
    }

    #[must_use]
    pub fn builder() -> SolitaireBuilder {
        SolitaireBuilder::new()
    }

    #[must_use]
    pub fn config(&self) -> &SolitaireConfig {
        &self.config
    }

    // === Entry points ===

    /// Shuffle and deal a new game, continuing the RNG stream.
    pub fn new_game(&mut self) -> MoveOutcome {
        self.record(SolitaireAction::NewGame);
        self.layout = Layout::deal(&mut self.rng);
        self.selection.clear();
        MoveOutcome::Dealt
    }

    /// Stock click: draw one card, or recycle the waste when the stock is out.
    pub fn draw_stock(&mut self) -> MoveOutcome {
        self.record(SolitaireAction::DrawStock);
        self.draw()
    }

    /// Click on a card or pile.
    ///
    /// With nothing selected this picks up `target`; with a selection held
    /// it tries to move the selection onto `target`'s pile. Clicking the
    /// selected tableau card again deselects it, and clicking the selected
    /// waste card again sends it to the first foundation that takes it.
    pub fn select_or_move(&mut self, target: PileRef) -> Result<MoveOutcome> {
        self.layout.check_ref(target)?;
        self.record(SolitaireAction::Click(target));

        if self.is_won() {
            self.selection.clear();
            return Ok(MoveOutcome::NoOp);
        }

        let outcome = match target {
            PileRef::Stock => self.draw(),
            PileRef::Waste => self.click_waste(),
            PileRef::Foundation(index) => self.click_foundation(index),
            PileRef::Tableau { column, offset } => self.click_tableau(column, offset),
        };
        Ok(outcome)
    }

    /// Drag-release of `carried` onto `dest`.
    pub fn drop_onto(&mut self, dest: Destination, carried: PileRef) -> Result<MoveOutcome> {
        self.layout.check_ref(carried)?;
        self.layout.check_destination(dest)?;
        self.record(SolitaireAction::Drop { carried, dest });

        if self.is_won() {
            self.selection.clear();
            return Ok(MoveOutcome::NoOp);
        }

        self.selection.replace(carried);
        Ok(self.execute(carried, dest))
    }

    // === Move executor ===

    /// Move the run at `source` onto `dest` if the rules allow it.
    ///
    /// The selection is cleared whether or not the move happens.
    pub fn attempt_move(&mut self, source: PileRef, dest: Destination) -> Result<MoveOutcome> {
        self.layout.check_ref(source)?;
        self.layout.check_destination(dest)?;
        // Same effect as a drop of `source`, so it replays as one
        self.record(SolitaireAction::Drop { carried: source, dest });

        if self.is_won() {
            self.selection.clear();
            return Ok(MoveOutcome::NoOp);
        }
        Ok(self.execute(source, dest))
    }

    /// Send the single card at `source` to the first foundation, in order
    /// 0..3, that accepts it.
    pub fn auto_send_to_foundation(&mut self, source: PileRef) -> Result<MoveOutcome> {
        self.layout.check_ref(source)?;
        self.record(SolitaireAction::AutoSend(source));

        if self.is_won() {
            self.selection.clear();
            return Ok(MoveOutcome::NoOp);
        }
        Ok(self.send_to_foundation(source))
    }

    /// Whether moving the run at `source` onto `dest` is legal right now.
    #[must_use]
    pub fn is_legal(&self, source: PileRef, dest: Destination) -> bool {
        let run = self.layout.moving_run(source);
        !source.same_pile(dest)
            && run.first().is_some_and(|card| card.face_up)
            && validator::legal_move(run, dest, self.layout.destination_cards(dest))
    }

    /// Every legal `(source, destination)` move in the current position.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<(PileRef, Destination)> {
        if self.is_won() {
            return Vec::new();
        }

        let mut moves = Vec::new();
        for source in self.sources() {
            for dest in Destination::all() {
                if self.is_legal(source, dest) {
                    moves.push((source, dest));
                }
            }
        }
        moves
    }

    // === Status ===

    /// Cards on foundations, 0..=52.
    #[must_use]
    pub fn foundation_count(&self) -> usize {
        self.layout.foundation_count()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.foundation_count() == DECK_SIZE {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status() == GameStatus::Won
    }

    // === Accessors ===

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn stock(&self) -> &Pile {
        self.layout.stock()
    }

    #[must_use]
    pub fn waste(&self) -> &Pile {
        self.layout.waste()
    }

    #[must_use]
    pub fn foundation(&self, index: usize) -> Option<&Pile> {
        self.layout.foundation(index)
    }

    #[must_use]
    pub fn foundations(&self) -> &[Pile] {
        self.layout.foundations()
    }

    #[must_use]
    pub fn tableau(&self, column: usize) -> Option<&Pile> {
        self.layout.tableau(column)
    }

    #[must_use]
    pub fn tableaus(&self) -> &[Pile] {
        self.layout.tableaus()
    }

    #[must_use]
    pub fn selection(&self) -> Option<PileRef> {
        self.selection.get()
    }

    /// Whether `tableau[column][index]` belongs to the selected run.
    #[must_use]
    pub fn is_highlighted(&self, column: usize, index: usize) -> bool {
        self.selection.covers(column, index)
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.layout.total_cards()
    }

    /// All entry-point calls so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord<SolitaireAction>> {
        &self.history
    }

    // === Snapshots ===

    /// Capture the table, selection and RNG position.
    #[must_use]
    pub fn snapshot(&self) -> SolitaireSnapshot {
        SolitaireSnapshot {
            config: self.config.clone(),
            layout: self.layout.clone(),
            selection: self.selection,
            rng: self.rng.state(),
        }
    }

    /// Rebuild a game from a snapshot. History starts empty.
    ///
    /// Fails if the table breaks a layout invariant or the selection points
    /// at a pile or card that does not exist.
    pub fn restore(snapshot: &SolitaireSnapshot) -> Result<Self> {
        snapshot.layout.validate().map_err(into_snapshot_error)?;
        if let Some(source) = snapshot.selection.get() {
            snapshot.layout.check_ref(source).map_err(into_snapshot_error)?;
        }

        Ok(Self {
            config: snapshot.config.clone(),
            layout: snapshot.layout.clone(),
            selection: snapshot.selection,
            rng: GameRng::from_state(&snapshot.rng),
            history: Vector::new(),
        })
    }

    // === Internals ===

    fn record(&mut self, action: SolitaireAction) {
        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord::new(action, sequence));
    }

    fn draw(&mut self) -> MoveOutcome {
        self.selection.clear();
        if self.is_won() {
            return MoveOutcome::NoOp;
        }

        match self.layout.draw_from_stock() {
            DrawResult::Drew(card) => MoveOutcome::Drew(card),
            DrawResult::Recycled(count) => MoveOutcome::Recycled(count),
            DrawResult::Empty => MoveOutcome::NoOp,
        }
    }

    fn click_waste(&mut self) -> MoveOutcome {
        if self.layout.waste().is_empty() {
            return MoveOutcome::NoOp;
        }

        match self.selection.get() {
            Some(PileRef::Waste) => match self.send_to_foundation(PileRef::Waste) {
                MoveOutcome::Rejected => MoveOutcome::Deselected,
                outcome => outcome,
            },
            _ => {
                self.selection.replace(PileRef::Waste);
                MoveOutcome::Selected(PileRef::Waste)
            }
        }
    }

    fn click_foundation(&mut self, index: usize) -> MoveOutcome {
        match self.selection.get() {
            Some(PileRef::Foundation(selected)) if selected == index => {
                return self.selection.toggle(PileRef::Foundation(index)).into();
            }
            Some(source) => return self.execute(source, Destination::Foundation(index)),
            None => {}
        }

        let occupied = self.layout.foundation(index).is_some_and(|pile| !pile.is_empty());
        if !occupied {
            return MoveOutcome::NoOp;
        }
        self.selection.replace(PileRef::Foundation(index));
        MoveOutcome::Selected(PileRef::Foundation(index))
    }

    fn click_tableau(&mut self, column: usize, offset: usize) -> MoveOutcome {
        let Some(pile) = self.layout.tableau(column) else {
            return MoveOutcome::NoOp;
        };

        // Empty column: only a landing spot
        if pile.is_empty() {
            return match self.selection.get() {
                Some(source) => self.execute(source, Destination::Tableau(column)),
                None => MoveOutcome::NoOp,
            };
        }

        if !pile.get(offset).is_some_and(|card| card.face_up) {
            self.selection.clear();
            return MoveOutcome::Rejected;
        }

        let target = PileRef::tableau(column, offset);
        match self.selection.get() {
            Some(source) if source != target => self.execute(source, Destination::Tableau(column)),
            _ => self.selection.toggle(target).into(),
        }
    }

    fn send_to_foundation(&mut self, source: PileRef) -> MoveOutcome {
        let target = (0..FOUNDATION_COUNT)
            .map(Destination::Foundation)
            .find(|&dest| self.layout.moving_run(source).len() == 1 && self.is_legal(source, dest));

        match target {
            Some(dest) => self.execute(source, dest),
            None => {
                self.selection.clear();
                debug!("no foundation takes {}", source);
                MoveOutcome::Rejected
            }
        }
    }

    fn execute(&mut self, source: PileRef, dest: Destination) -> MoveOutcome {
        if !self.is_legal(source, dest) {
            self.selection.clear();
            debug!("rejected move {} -> {}", source, dest);
            return MoveOutcome::Rejected;
        }

        let run = self.layout.take_run(source);
        let cards = run.len();
        self.layout.place(dest, run);

        if let PileRef::Tableau { column, .. } = source {
            self.layout.reveal_tableau_top(column);
        }

        self.selection.clear();
        debug!("moved {} card(s) {} -> {}", cards, source, dest);
        if self.is_won() {
            debug!("game won: all {} cards on foundations", DECK_SIZE);
        }

        MoveOutcome::Moved {
            from: source,
            to: dest,
            cards,
        }
    }

    fn sources(&self) -> Vec<PileRef> {
        let mut sources = Vec::new();

        if !self.layout.waste().is_empty() {
            sources.push(PileRef::Waste);
        }
        for (index, pile) in self.layout.foundations().iter().enumerate() {
            if !pile.is_empty() {
                sources.push(PileRef::Foundation(index));
            }
        }
        for (column, pile) in self.layout.tableaus().iter().enumerate() {
            for offset in pile.face_up_start()..pile.len() {
                sources.push(PileRef::tableau(column, offset));
            }
        }

        sources
    }
}

impl RulesEngine for Solitaire {
    type Action = SolitaireAction;
    type Outcome = MoveOutcome;

    /// Draws (while any card is in stock or waste) plus every legal move,
    /// expressed as drops.
    fn legal_actions(&self) -> Vec<SolitaireAction> {
        if self.is_won() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        if !self.layout.stock().is_empty() || !self.layout.waste().is_empty() {
            actions.push(SolitaireAction::DrawStock);
        }
        actions.extend(
            self.legal_moves()
                .into_iter()
                .map(|(carried, dest)| SolitaireAction::Drop { carried, dest }),
        );
        actions
    }

    fn apply(&mut self, action: &SolitaireAction) -> Result<MoveOutcome> {
        match *action {
            SolitaireAction::NewGame => Ok(self.new_game()),
            SolitaireAction::DrawStock => Ok(self.draw_stock()),
            SolitaireAction::Click(target) => self.select_or_move(target),
            SolitaireAction::Drop { carried, dest } => self.drop_onto(dest, carried),
            SolitaireAction::AutoSend(source) => self.auto_send_to_foundation(source),
        }
    }

    fn status(&self) -> GameStatus {
        Solitaire::status(self)
    }
}

fn into_snapshot_error(err: GameError) -> GameError {
    match err {
        GameError::InvalidConfig(msg) | GameError::InvalidReference(msg) => GameError::Snapshot(msg),
        other => other,
    }
}

/// Serializable game position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolitaireSnapshot {
    pub config: SolitaireConfig,
    pub layout: Layout,
    pub selection: Selection,
    pub rng: GameRngState,
}

impl SolitaireSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
