//! Minesweeper controller.

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{ActionRecord, GameError, GameRng, Result};
use crate::rules::{GameStatus, RulesEngine};

use super::board::{Board, Cell};

/// Minesweeper configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinesweeperConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
    pub seed: u64,
}

impl Default for MinesweeperConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            mines: 10,
            seed: 0,
        }
    }
}

impl MinesweeperConfig {
    pub fn validate(&self) -> Result<()> {
        let cells = self.cell_count()?;
        if self.mines >= cells {
            return Err(GameError::InvalidConfig(format!(
                "{} mines do not fit a {}x{} board",
                self.mines, self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// `rows * cols`, failing on an empty or unaddressable board.
    fn cell_count(&self) -> Result<usize> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidConfig(format!(
                "board must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        self.rows.checked_mul(self.cols).ok_or_else(|| {
            GameError::InvalidConfig(format!("a {}x{} board is too large", self.rows, self.cols))
        })
    }
}

/// Player input, as recorded in the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepAction {
    Reveal { row: usize, col: usize },
    ToggleFlag { row: usize, col: usize },
    Reset,
}

/// What an action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepOutcome {
    /// This many safe cells were opened (flood fill included).
    Opened(usize),
    /// A mine was revealed; the game is lost.
    Detonated,
    Flagged,
    Unflagged,
    /// A fresh board was laid.
    Reset,
    /// Nothing to do (game over, cell already open or flagged).
    NoOp,
}

/// Builder for creating a Minesweeper game.
#[derive(Clone, Debug, Default)]
pub struct MinesweeperBuilder {
    config: MinesweeperConfig,
    mines_at: Option<Vec<(usize, usize)>>,
}

impl MinesweeperBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.config.rows = rows;
        self
    }

    pub fn cols(mut self, cols: usize) -> Self {
        self.config.cols = cols;
        self
    }

    pub fn mines(mut self, mines: usize) -> Self {
        self.config.mines = mines;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Lay the first board with mines at fixed coordinates.
    ///
    /// Overrides the mine count. Later resets place mines randomly again.
    pub fn mines_at(mut self, mines: &[(usize, usize)]) -> Self {
        self.mines_at = Some(mines.to_vec());
        self
    }

    pub fn build(self) -> Result<Minesweeper> {
        let mut config = self.config;
        let mut rng = GameRng::new(config.seed);

        let board = match self.mines_at {
            Some(mines) => {
                config.cell_count()?;
                let board = Board::with_mines(config.rows, config.cols, &mines);
                config.mines = board.mine_count();
                config.validate()?;
                board
            }
            None => {
                config.validate()?;
                Board::generate(config.rows, config.cols, config.mines, &mut rng)
            }
        };

        Ok(Minesweeper {
            config,
            board,
            rng,
            status: GameStatus::InProgress,
            revealed: 0,
            flags: 0,
            detonated: None,
            history: Vector::new(),
        })
    }
}

/// Minesweeper game.
#[derive(Clone, Debug)]
pub struct Minesweeper {
    config: MinesweeperConfig,
    board: Board,
    rng: GameRng,
    status: GameStatus,
    revealed: usize,
    flags: usize,
    detonated: Option<(usize, usize)>,
    history: Vector<ActionRecord<SweepAction>>,
}

impl Minesweeper {
    /// A game with the given configuration.
    pub fn new(config: MinesweeperConfig) -> Result<Self> {
        MinesweeperBuilder {
            config,
            mines_at: None,
        }
        .build()
    }

    #[must_use]
    pub fn builder() -> MinesweeperBuilder {
        MinesweeperBuilder::new()
    }

    // === Entry points ===

    /// Open a cell. Opening a zero cell floods outward to its numbered border.
    pub fn reveal(&mut self, row: usize, col: usize) -> Result<SweepOutcome> {
        self.check_coords(row, col)?;
        self.record(SweepAction::Reveal { row, col });

        if self.status.is_over() {
            return Ok(SweepOutcome::NoOp);
        }
        let Some(cell) = self.board.cell(row, col).copied() else {
            return Ok(SweepOutcome::NoOp);
        };
        if cell.revealed || cell.flagged {
            return Ok(SweepOutcome::NoOp);
        }

        if cell.mine {
            self.detonate(row, col);
            return Ok(SweepOutcome::Detonated);
        }

        let opened = self.flood_reveal(row, col);
        if self.revealed == self.safe_cells() {
            self.status = GameStatus::Won;
            debug!("board cleared after {} actions", self.history.len());
        }
        Ok(SweepOutcome::Opened(opened))
    }

    /// Flag or unflag an unopened cell.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> Result<SweepOutcome> {
        self.check_coords(row, col)?;
        self.record(SweepAction::ToggleFlag { row, col });

        if self.status.is_over() {
            return Ok(SweepOutcome::NoOp);
        }
        let Some(cell) = self.board.cell_mut(row, col) else {
            return Ok(SweepOutcome::NoOp);
        };
        if cell.revealed {
            return Ok(SweepOutcome::NoOp);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flags += 1;
            Ok(SweepOutcome::Flagged)
        } else {
            self.flags -= 1;
            Ok(SweepOutcome::Unflagged)
        }
    }

    /// Lay a fresh board from the continuing RNG stream.
    pub fn reset(&mut self) -> SweepOutcome {
        self.record(SweepAction::Reset);
        self.board = Board::generate(self.config.rows, self.config.cols, self.config.mines, &mut self.rng);
        self.status = GameStatus::InProgress;
        self.revealed = 0;
        self.flags = 0;
        self.detonated = None;
        debug!("new {}x{} board with {} mines", self.config.rows, self.config.cols, self.config.mines);
        SweepOutcome::Reset
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MinesweeperConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.board.cell(row, col)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Safe cells opened so far.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    #[must_use]
    pub fn flags_placed(&self) -> usize {
        self.flags
    }

    /// Mines minus flags. Goes negative when the player over-flags.
    #[must_use]
    pub fn mines_remaining(&self) -> i64 {
        self.config.mines as i64 - self.flags as i64
    }

    /// The mine that ended the game, if one did.
    #[must_use]
    pub fn detonated(&self) -> Option<(usize, usize)> {
        self.detonated
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord<SweepAction>> {
        &self.history
    }

    // === Internals ===

    fn safe_cells(&self) -> usize {
        self.board.len() - self.config.mines
    }

    fn check_coords(&self, row: usize, col: usize) -> Result<()> {
        if self.board.in_bounds(row, col) {
            Ok(())
        } else {
            Err(GameError::InvalidReference(format!(
                "cell ({}, {}) on a {}x{} board",
                row,
                col,
                self.board.rows(),
                self.board.cols()
            )))
        }
    }

    fn record(&mut self, action: SweepAction) {
        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord::new(action, sequence));
    }

    fn detonate(&mut self, row: usize, col: usize) {
        let mines: Vec<_> = self.board.mines().collect();
        for (r, c) in mines {
            if let Some(cell) = self.board.cell_mut(r, c) {
                cell.revealed = true;
            }
        }
        self.detonated = Some((row, col));
        self.status = GameStatus::Lost;
        debug!("mine hit at ({}, {})", row, col);
    }

    /// Open `(row, col)` and, through zero cells, everything connected to it.
    ///
    /// Flagged cells are never opened. Returns the number of cells opened.
    fn flood_reveal(&mut self, row: usize, col: usize) -> usize {
        let mut opened = 0;
        let mut pending = vec![(row, col)];

        while let Some((r, c)) = pending.pop() {
            let Some(cell) = self.board.cell_mut(r, c) else {
                continue;
            };
            if cell.revealed || cell.flagged || cell.mine {
                continue;
            }
            cell.revealed = true;
            opened += 1;

            if cell.adjacent == 0 {
                pending.extend(self.board.neighbors(r, c));
            }
        }

        self.revealed += opened;
        opened
    }
}

impl RulesEngine for Minesweeper {
    type Action = SweepAction;
    type Outcome = SweepOutcome;

    /// Reveal and flag actions for every unopened cell.
    fn legal_actions(&self) -> Vec<SweepAction> {
        if self.status.is_over() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        for row in 0..self.board.rows() {
            for col in 0..self.board.cols() {
                let Some(cell) = self.board.cell(row, col) else {
                    continue;
                };
                if cell.revealed {
                    continue;
                }
                if !cell.flagged {
                    actions.push(SweepAction::Reveal { row, col });
                }
                actions.push(SweepAction::ToggleFlag { row, col });
            }
        }
        actions
    }

    fn apply(&mut self, action: &SweepAction) -> Result<SweepOutcome> {
        match *action {
            SweepAction::Reveal { row, col } => self.reveal(row, col),
            SweepAction::ToggleFlag { row, col } => self.toggle_flag(row, col),
            SweepAction::Reset => Ok(self.reset()),
        }
    }

    fn status(&self) -> GameStatus {
        self.status
    }
}
