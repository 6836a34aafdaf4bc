//! Draw and terminal-state detection for tic-tac-toe.

use super::super::{Board, GameStatus, Player, Square};
use super::win::check_winner;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(level = "trace")]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board with no winner.
#[instrument(level = "trace")]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

/// No further moves are legal: someone won or the board is drawn.
#[instrument(level = "trace")]
pub fn is_terminal(board: &Board) -> bool {
    check_winner(board).is_some() || is_draw(board)
}

/// Derives the status of `board` given whose turn it would be.
#[instrument(level = "trace")]
pub fn status_of(board: &Board, to_move: Player) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Winner(winner)
    } else if is_draw(board) {
        GameStatus::Draw
    } else {
        GameStatus::NextTurn(to_move)
    }
}
