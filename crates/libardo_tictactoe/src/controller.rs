//! Game controller: history, mode, turn gating and the opponent ticket.
//!
//! Every operation is synchronous. When the computer should move, the
//! controller only *issues* an [`OpponentTicket`]; whoever drives the
//! game waits out the thinking delay and redeems it with
//! [`GameController::play_opponent_move`]. Any state change retires the
//! outstanding ticket, so a late redemption is discarded.

use super::action::{Move, MoveError};
use super::contracts::{Contract, HumansTurn, LegalMove, MoveContract};
use super::heuristic::HeuristicOpponent;
use super::rules::{is_terminal, status_of};
use super::{Board, GameStatus, History, Mode, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A promise of one deferred computer move.
///
/// Only the most recently issued ticket can be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpponentTicket {
    generation: u64,
    step: usize,
    mark: Player,
}

impl OpponentTicket {
    /// State generation the ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// History step the computer will move from.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Mark the computer will place.
    pub fn mark(&self) -> Player {
        self.mark
    }
}

/// One row of the time-travel list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveListEntry {
    /// History step this entry jumps to.
    pub step: usize,
    /// Button text.
    pub label: String,
    /// Whether this is the step being viewed.
    pub current: bool,
}

impl MoveListEntry {
    fn new(step: usize, current: bool) -> Self {
        let label = if step == 0 {
            "Go to game start".to_string()
        } else {
            format!("Go to move #{}", step)
        };
        Self {
            step,
            label,
            current,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Board at the current step.
    pub board: Board,
    /// Derived status of that board.
    pub status: GameStatus,
    /// Current step.
    pub step: usize,
    /// Number of history entries.
    pub history_len: usize,
    /// Current mode.
    pub mode: Mode,
    /// Time-travel list.
    pub move_list: Vec<MoveListEntry>,
    /// Whether a computer move is pending.
    pub opponent_thinking: bool,
}

/// Owns the branching history and the current mode.
#[derive(Debug)]
pub struct GameController {
    history: History,
    mode: Mode,
    opponent: HeuristicOpponent,
    generation: u64,
    pending: Option<OpponentTicket>,
}

impl GameController {
    /// Creates a two-player game with an entropy-seeded opponent.
    #[instrument]
    pub fn new() -> Self {
        Self::with_opponent(HeuristicOpponent::new())
    }

    /// Creates a two-player game using the given opponent.
    #[instrument]
    pub fn with_opponent(opponent: HeuristicOpponent) -> Self {
        Self {
            history: History::new(),
            mode: Mode::default(),
            opponent,
            generation: 0,
            pending: None,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Derived views
    // ─────────────────────────────────────────────────────────────

    /// The full history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Board at the current step.
    pub fn current_board(&self) -> &Board {
        self.history.current_board()
    }

    /// Current step.
    pub fn current_step(&self) -> usize {
        self.history.current_step()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Player to move at the current step (X on even steps).
    pub fn to_move(&self) -> Player {
        self.history.to_move()
    }

    /// Winner, draw, or whose turn it is.
    pub fn status(&self) -> GameStatus {
        status_of(self.current_board(), self.to_move())
    }

    /// The outstanding computer move, if any.
    pub fn pending_opponent_move(&self) -> Option<OpponentTicket> {
        self.pending
    }

    /// Time-travel list, one entry per history step.
    pub fn move_list(&self) -> Vec<MoveListEntry> {
        let current = self.current_step();
        (0..self.history.len())
            .map(|step| MoveListEntry::new(step, step == current))
            .collect()
    }

    /// Render view of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: *self.current_board(),
            status: self.status(),
            step: self.current_step(),
            history_len: self.history.len(),
            mode: self.mode,
            move_list: self.move_list(),
            opponent_thinking: self.pending.is_some(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────────

    /// Checks whether a human move at `cell` would be accepted.
    #[instrument(skip(self), fields(step = self.current_step(), mode = %self.mode))]
    pub fn check_move(&self, cell: usize) -> Result<Position, MoveError> {
        let position = Position::from_index(cell).ok_or(MoveError::OutOfRange(cell))?;
        let action = Move::new(self.to_move(), position);
        LegalMove::check(&action, &self.history)?;
        HumansTurn::check(action.player, self.mode)?;
        Ok(position)
    }

    /// Places the current player's mark at `cell` for a human.
    ///
    /// Invalid moves are ignored and return false; nothing changes.
    #[instrument(skip(self), fields(step = self.current_step()))]
    pub fn apply_move(&mut self, cell: usize) -> bool {
        match self.check_move(cell) {
            Ok(position) => {
                self.commit(position);
                true
            }
            Err(error) => {
                debug!(%error, "Ignoring move");
                false
            }
        }
    }

    /// Moves the cursor to `step` without truncating history.
    ///
    /// Out-of-range steps are ignored and return false.
    #[instrument(skip(self), fields(from = self.current_step()))]
    pub fn jump_to(&mut self, step: usize) -> bool {
        if step == self.current_step() {
            return step < self.history.len();
        }
        if !self.history.jump_to(step) {
            return false;
        }
        debug!(step, "Jumped");
        self.refresh_opponent();
        true
    }

    /// Clears the board and history, keeping the mode.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(mode = %self.mode, "Resetting board");
        self.history.clear();
        self.refresh_opponent();
    }

    /// Clears the board and returns to two-player mode.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        info!("Starting new game");
        self.mode = Mode::HumanVsHuman;
        self.history.clear();
        self.refresh_opponent();
    }

    /// Switches mode without touching history.
    #[instrument(skip(self), fields(from = %self.mode))]
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        info!(to = %mode, "Changing mode");
        self.mode = mode;
        self.refresh_opponent();
    }

    /// Flips between the two modes.
    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggle());
    }

    /// Redeems a ticket: lets the heuristic move if the ticket is current.
    ///
    /// Returns the move applied, or `None` when the ticket is stale or the
    /// position no longer admits the computer's move.
    #[instrument(skip(self))]
    pub fn play_opponent_move(&mut self, ticket: OpponentTicket) -> Option<Move> {
        if self.pending != Some(ticket) {
            debug!(current = self.generation, "Discarding stale opponent ticket");
            return None;
        }
        self.pending = None;

        let board = *self.current_board();
        if is_terminal(&board) || self.to_move() != ticket.mark {
            debug!("Position changed under the ticket");
            return None;
        }

        let position = self.opponent.choose_move(&board, ticket.mark)?;
        let action = Move::new(ticket.mark, position);
        if let Err(error) = MoveContract::pre(&self.history, &action) {
            debug!(%error, "Discarding opponent move");
            return None;
        }

        Some(self.commit(position))
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    /// Branches at the cursor and appends the move. Preconditions are
    /// the caller's job.
    fn commit(&mut self, position: Position) -> Move {
        #[cfg(debug_assertions)]
        let before = self.history.clone();

        let player = self.history.place(position);

        #[cfg(debug_assertions)]
        {
            let checked = MoveContract::post(&before, &self.history);
            debug_assert!(checked.is_ok(), "{:?}", checked);
            debug_assert!(
                super::contracts::BoardConsistent::holds(self.current_board()),
                "Board consistency violated"
            );
        }

        let action = Move::new(player, position);
        info!(
            %action,
            step = self.current_step(),
            status = %self.status(),
            "Move applied"
        );
        self.refresh_opponent();
        action
    }

    /// Retires the current ticket and issues a new one if the computer
    /// is to move on an open board.
    fn refresh_opponent(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(stale) = self.pending.take() {
            debug!(generation = stale.generation, "Cancelled pending opponent move");
        }

        let to_move = self.to_move();
        if self.mode.computer_mark() == Some(to_move) && !is_terminal(self.current_board()) {
            let ticket = OpponentTicket {
                generation: self.generation,
                step: self.current_step(),
                mark: to_move,
            };
            debug!(generation = ticket.generation, step = ticket.step, "Opponent move scheduled");
            self.pending = Some(ticket);
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}
