//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Position, Square};
use tracing::instrument;

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark of the first line (in [`LINES`] order) holding three
/// identical marks, `None` otherwise. Total over any board, including
/// ones no legal game could produce.
#[instrument(level = "trace")]
pub fn check_winner(board: &Board) -> Option<Player> {
    for [a, b, c] in LINES {
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            return sq.player();
        }
    }

    None
}

/// Returns true if placing `player` at `pos` gives `player` three in a row.
///
/// The square is assumed empty; the caller filters occupied squares.
#[instrument(level = "trace")]
pub fn completes_line(board: &Board, pos: Position, player: Player) -> bool {
    let next = board.with_mark(pos, player);
    LINES.iter().any(|line| {
        line.iter()
            .all(|p| next.get(*p) == Square::Occupied(player))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            let mut board = Board::new();
            for pos in line {
                board.set(pos, Square::Occupied(Player::O));
            }
            assert_eq!(check_winner(&board), Some(Player::O), "line {:?}", line);
        }
    }

    #[test]
    fn test_two_in_a_row_is_not_a_win() {
        assert_eq!(check_winner(&Board::parse("XX./.O./...")), None);
        assert_eq!(check_winner(&Board::parse("XOX/OXO/O.O")), None);
    }

    #[test]
    fn test_two_winners_reports_first_line() {
        // Unreachable in play: X owns the top row, O the bottom row.
        let board = Board::parse("XXX/.../OOO");
        assert_eq!(check_winner(&board), Some(Player::X));
    }

    #[test]
    fn test_completes_line() {
        let board = Board::parse("XX./OO./...");
        assert!(completes_line(&board, Position::TopRight, Player::X));
        assert!(!completes_line(&board, Position::TopRight, Player::O));
        assert!(completes_line(&board, Position::MiddleRight, Player::O));
        assert!(!completes_line(&board, Position::BottomCenter, Player::X));
    }
}
