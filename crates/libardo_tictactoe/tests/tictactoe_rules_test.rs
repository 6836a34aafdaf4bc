//! Tests for the rules engine over arbitrary boards.

use libardo_tictactoe::{Board, Player, Square, check_winner, is_draw, is_full, is_terminal};

/// Every one of the 3^9 arrangements, legal or not.
fn all_boards() -> impl Iterator<Item = Board> {
    (0..3u32.pow(9)).map(|mut code| {
        let mut squares = [Square::Empty; 9];
        for square in squares.iter_mut() {
            *square = match code % 3 {
                0 => Square::Empty,
                1 => Square::Occupied(Player::X),
                _ => Square::Occupied(Player::O),
            };
            code /= 3;
        }
        Board::from_squares(squares)
    })
}

#[test]
fn test_rules_are_total() {
    for board in all_boards() {
        let winner = check_winner(&board);
        let draw = is_draw(&board);
        assert_eq!(draw, is_full(&board) && winner.is_none());
        assert_eq!(is_terminal(&board), winner.is_some() || draw);
    }
}

#[test]
fn test_winner_is_a_present_mark() {
    for board in all_boards() {
        if let Some(winner) = check_winner(&board) {
            let marks = board
                .squares()
                .iter()
                .filter(|s| **s == Square::Occupied(winner))
                .count();
            assert!(marks >= 3);
        }
    }
}
