//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::invariants::{HistoryInvariants, InvariantSet};
use super::rules::check_winner;
use super::{Board, History, Mode, Player, Position};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the board at the cursor is neither won nor drawn.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`MoveError::GameOver`] on a won or drawn board.
    #[instrument(level = "trace", skip(board))]
    pub fn check(board: &Board) -> Result<(), MoveError> {
        if super::rules::is_terminal(board) {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with [`MoveError::SquareOccupied`] if `pos` is taken.
    #[instrument(level = "trace", skip(board))]
    pub fn check(pos: Position, board: &Board) -> Result<(), MoveError> {
        if board.is_empty(pos) {
            Ok(())
        } else {
            Err(MoveError::SquareOccupied(pos))
        }
    }
}

/// Precondition: it must be the player's turn at the cursor.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`MoveError::WrongPlayer`] if the mover is out of turn.
    #[instrument(level = "trace", skip(history))]
    pub fn check(mov: &Move, history: &History) -> Result<(), MoveError> {
        if mov.player != history.to_move() {
            Err(MoveError::WrongPlayer(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: a human may place this mark in the current mode.
///
/// Not part of [`LegalMove`]: the computer's own moves skip it.
pub struct HumansTurn;

impl HumansTurn {
    /// Fails with [`MoveError::NotHumansTurn`] for the computer's mark.
    #[instrument(level = "trace")]
    pub fn check(player: Player, mode: Mode) -> Result<(), MoveError> {
        if mode.is_human(player) {
            Ok(())
        } else {
            Err(MoveError::NotHumansTurn(player))
        }
    }
}

/// Composite precondition: the game is open, the square is empty and it
/// is the mover's turn.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(level = "trace", skip(history))]
    pub fn check(mov: &Move, history: &History) -> Result<(), MoveError> {
        let board = history.current_board();
        GameNotOver::check(board)?;
        SquareIsEmpty::check(mov.position, board)?;
        PlayersTurn::check(mov, history)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for appending a move to the history.
///
/// Preconditions:
/// - Game is not over at the cursor
/// - Square must be empty
/// - Must be the mover's turn
///
/// Postconditions:
/// - History is the pre-move prefix plus exactly one entry
/// - All [`HistoryInvariants`] hold
pub struct MoveContract;

impl Contract<History, Move> for MoveContract {
    fn pre(history: &History, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, history)
    }

    fn post(before: &History, after: &History) -> Result<(), MoveError> {
        let kept = before.current_step() + 1;
        if after.len() != kept + 1 || after.entries()[..kept] != before.entries()[..kept] {
            warn!(
                before_len = before.len(),
                after_len = after.len(),
                "History did not branch at the cursor"
            );
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: history must branch at the cursor".to_string(),
            ));
        }

        HistoryInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Invariant: board state is consistent (X's and O's differ by ≤ 1, and
/// at most one mark has a line).
pub struct BoardConsistent;

impl BoardConsistent {
    /// True when mark counts and lines could arise from legal play.
    #[instrument(level = "trace", skip(board))]
    pub fn holds(board: &Board) -> bool {
        let count = |player| {
            board
                .squares()
                .iter()
                .filter(|s| s.player() == Some(player))
                .count()
        };
        let x_count = count(Player::X);
        let o_count = count(Player::O);

        let counts_ok = x_count == o_count || x_count == o_count + 1;
        let single_winner = match check_winner(board) {
            Some(winner) => {
                let rival = winner.opponent();
                super::rules::LINES.iter().all(|line| {
                    line.iter()
                        .any(|p| board.get(*p).player() != Some(rival))
                })
            }
            None => true,
        };

        let valid = counts_ok && single_winner;
        if !valid {
            warn!(x_count, o_count, single_winner, "Board consistency violated");
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    #[test]
    fn test_precondition_empty_square() {
        let history = History::new();
        let action = Move::new(Player::X, Position::Center);
        assert!(MoveContract::pre(&history, &action).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let mut history = History::new();
        history.place(Position::Center);
        let action = Move::new(Player::O, Position::Center);
        assert_eq!(
            MoveContract::pre(&history, &action),
            Err(MoveError::SquareOccupied(Position::Center))
        );
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let history = History::new();
        let action = Move::new(Player::O, Position::Center);
        assert_eq!(
            MoveContract::pre(&history, &action),
            Err(MoveError::WrongPlayer(Player::O))
        );
    }

    #[test]
    fn test_precondition_game_over() {
        let mut history = History::new();
        for pos in [
            Position::TopLeft,
            Position::Center,
            Position::TopCenter,
            Position::BottomLeft,
            Position::TopRight,
        ] {
            history.place(pos);
        }
        let action = Move::new(Player::O, Position::BottomRight);
        assert_eq!(MoveContract::pre(&history, &action), Err(MoveError::GameOver));
    }

    #[test]
    fn test_humans_turn() {
        assert!(HumansTurn::check(Player::O, Mode::HumanVsHuman).is_ok());
        assert_eq!(
            HumansTurn::check(Player::O, Mode::HumanVsHeuristic),
            Err(MoveError::NotHumansTurn(Player::O))
        );
    }

    #[test]
    fn test_postcondition_holds_after_branch() {
        let mut before = History::new();
        before.place(Position::Center);
        before.place(Position::TopLeft);
        before.jump_to(1);

        let mut after = before.clone();
        after.place(Position::BottomRight);
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = History::new();
        let mut corrupt = Board::new();
        corrupt.set(Position::TopLeft, Square::Occupied(Player::O));
        let after = History::from_raw(vec![Board::new(), corrupt], 1);
        assert!(MoveContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_postcondition_detects_missing_truncation() {
        let mut before = History::new();
        before.place(Position::Center);
        before.jump_to(0);
        let after = History::from_raw(
            vec![
                Board::new(),
                Board::new().with_mark(Position::Center, Player::X),
                Board::new().with_mark(Position::Center, Player::X),
            ],
            2,
        );
        assert!(MoveContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_board_consistent() {
        assert!(BoardConsistent::holds(&Board::new()));
        let lopsided = Board::new()
            .with_mark(Position::TopLeft, Player::O)
            .with_mark(Position::Center, Player::O);
        assert!(!BoardConsistent::holds(&lopsided));
    }
}
