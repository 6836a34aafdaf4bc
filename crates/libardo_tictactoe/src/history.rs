//! Branching move history: an append-only board log with a cursor.
//!
//! Time travel only moves the cursor. Playing from an earlier step
//! truncates everything after the cursor before appending, so "undo and
//! continue" never needs a tree.

use super::invariants::{HistoryInvariants, InvariantSet};
use super::position::Position;
use super::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Board snapshots produced by successive moves, plus the step being viewed.
///
/// Deserialising checks every history invariant, so a decoded history is
/// as sound as one built by play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct History {
    entries: Vec<Board>,
    current_step: usize,
}

impl History {
    /// Creates a history holding only the empty board.
    pub fn new() -> Self {
        Self {
            entries: vec![Board::new()],
            current_step: 0,
        }
    }

    /// All snapshots, oldest first. Never empty.
    pub fn entries(&self) -> &[Board] {
        &self.entries
    }

    /// Number of snapshots, including the initial empty board.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least the empty board.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the snapshot currently viewed.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// The board at the cursor.
    pub fn current_board(&self) -> &Board {
        &self.entries[self.current_step]
    }

    /// The player to move at the cursor, derived from step parity.
    pub fn to_move(&self) -> Player {
        Player::for_step(self.current_step)
    }

    /// True when the cursor sits on the newest snapshot.
    pub fn at_latest(&self) -> bool {
        self.current_step + 1 == self.entries.len()
    }

    /// Moves the cursor without touching the log.
    ///
    /// Returns false, leaving the cursor alone, when `step` is out of range.
    #[instrument(skip(self), fields(len = self.entries.len()))]
    pub fn jump_to(&mut self, step: usize) -> bool {
        if step >= self.entries.len() {
            debug!(step, "Jump target out of range");
            return false;
        }
        self.current_step = step;
        true
    }

    /// Branches at the cursor and appends `board` as the next snapshot.
    ///
    /// Entries after the cursor are discarded first. The cursor ends on
    /// the new snapshot.
    #[instrument(skip(self, board), fields(step = self.current_step, len = self.entries.len()))]
    pub(crate) fn branch_and_push(&mut self, board: Board) {
        let dropped = self.entries.len() - (self.current_step + 1);
        if dropped > 0 {
            debug!(dropped, "Discarding future entries before branching");
        }
        self.entries.truncate(self.current_step + 1);
        self.entries.push(board);
        self.current_step = self.entries.len() - 1;
    }

    /// Places the mark for the current turn at `pos` and branches.
    pub(crate) fn place(&mut self, pos: Position) -> Player {
        let player = self.to_move();
        let next = self.current_board().with_mark(pos, player);
        self.branch_and_push(next);
        player
    }

    /// Back to a single empty snapshot.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.entries.push(Board::new());
        self.current_step = 0;
    }

    /// Builds a history without any checks, for corrupt-state tests.
    #[cfg(test)]
    pub(crate) fn from_raw(entries: Vec<Board>, current_step: usize) -> Self {
        Self {
            entries,
            current_step,
        }
    }
}

/// Wire form of [`History`] before validation.
#[derive(Deserialize)]
struct RawHistory {
    entries: Vec<Board>,
    current_step: usize,
}

impl TryFrom<RawHistory> for History {
    type Error = String;

    fn try_from(raw: RawHistory) -> Result<Self, Self::Error> {
        let history = Self {
            entries: raw.entries,
            current_step: raw.current_step,
        };
        HistoryInvariants::check_all(&history).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            debug!(%descriptions, "Rejected decoded history");
            format!("Invalid history: {}", descriptions)
        })?;
        Ok(history)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
