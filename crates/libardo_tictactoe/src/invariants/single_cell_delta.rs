//! Single-cell delta invariant: each snapshot adds exactly one mark.

use super::super::{Board, History};
use super::{Invariant, diff};

/// Invariant: entry *n* differs from entry *n-1* by exactly one square
/// going from empty to occupied, and entry 0 is the empty board.
pub struct SingleCellDeltaInvariant;

impl Invariant<History> for SingleCellDeltaInvariant {
    fn holds(history: &History) -> bool {
        let entries = history.entries();
        if entries.first() != Some(&Board::new()) {
            return false;
        }

        entries.windows(2).all(|pair| {
            let (added, other_change) = diff(&pair[0], &pair[1]);
            added.len() == 1 && !other_change
        })
    }

    fn description() -> &'static str {
        "Each history entry adds exactly one mark to an empty square"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position, Square};

    #[test]
    fn test_new_history_holds() {
        assert!(SingleCellDeltaInvariant::holds(&History::new()));
    }

    #[test]
    fn test_moves_hold() {
        let mut history = History::new();
        history.place(Position::Center);
        history.place(Position::BottomLeft);
        assert!(SingleCellDeltaInvariant::holds(&history));
    }

    #[test]
    fn test_two_marks_in_one_step_violates() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::Center, Square::Occupied(Player::O));
        let history = History::from_raw(vec![Board::new(), board], 1);
        assert!(!SingleCellDeltaInvariant::holds(&history));
    }

    #[test]
    fn test_overwrite_violates() {
        let first = Board::new().with_mark(Position::Center, Player::X);
        let second = Board::new().with_mark(Position::Center, Player::O);
        let history = History::from_raw(vec![Board::new(), first, second], 2);
        assert!(!SingleCellDeltaInvariant::holds(&history));
    }

    #[test]
    fn test_nonempty_start_violates() {
        let start = Board::new().with_mark(Position::Center, Player::X);
        let history = History::from_raw(vec![start], 0);
        assert!(!SingleCellDeltaInvariant::holds(&history));
    }
}
