//! Fixed-priority opponent: win, block, center, corner, side.
//!
//! This is not a search. Each rule is tried in order and the first one
//! that yields a square wins. Only the corner and side picks use the RNG.

use super::rules::completes_line;
use super::{Board, Player, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which rule of the policy produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Tactic {
    /// Completes a line for the computer.
    Win,
    /// Occupies the square that would complete a line for the human.
    Block,
    /// Takes the center square.
    Center,
    /// Takes a random free corner.
    Corner,
    /// Takes a random free side square.
    Side,
}

/// Picks a move for `ai` on `board`, or `None` if the board is full.
///
/// Win and block scan empty squares in ascending index order and take
/// the first hit.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn choose_move<R: Rng + ?Sized>(board: &Board, ai: Player, rng: &mut R) -> Option<Position> {
    choose_with_tactic(board, ai, rng).map(|(pos, _)| pos)
}

/// Like [`choose_move`], also reporting which rule fired.
pub fn choose_with_tactic<R: Rng + ?Sized>(
    board: &Board,
    ai: Player,
    rng: &mut R,
) -> Option<(Position, Tactic)> {
    let human = ai.opponent();
    let empties = Position::valid_moves(board);

    if let Some(pos) = empties.iter().copied().find(|p| completes_line(board, *p, ai)) {
        return Some((pos, Tactic::Win));
    }

    if let Some(pos) = empties
        .iter()
        .copied()
        .find(|p| completes_line(board, *p, human))
    {
        return Some((pos, Tactic::Block));
    }

    if board.is_empty(Position::Center) {
        return Some((Position::Center, Tactic::Center));
    }

    let free = |candidates: [Position; 4]| -> Vec<Position> {
        candidates.into_iter().filter(|p| board.is_empty(*p)).collect()
    };

    if let Some(pos) = free(Position::CORNERS).choose(rng) {
        return Some((*pos, Tactic::Corner));
    }

    if let Some(pos) = free(Position::SIDES).choose(rng) {
        return Some((*pos, Tactic::Side));
    }

    None
}

/// The heuristic policy bundled with its own RNG.
pub struct HeuristicOpponent {
    rng: Box<dyn RngCore + Send>,
}

impl HeuristicOpponent {
    /// Creates an opponent seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Creates an opponent with a fixed seed (reproducible corner/side picks).
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Box::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Chooses a move for `ai` on `board`.
    #[instrument(skip(self, board))]
    pub fn choose_move(&mut self, board: &Board, ai: Player) -> Option<Position> {
        let choice = choose_with_tactic(board, ai, self.rng.as_mut());
        match choice {
            Some((pos, tactic)) => debug!(position = %pos, %tactic, "Heuristic chose move"),
            None => debug!("No empty squares left"),
        }
        choice.map(|(pos, _)| pos)
    }
}

impl Default for HeuristicOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HeuristicOpponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicOpponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &[(usize, Player)]) -> Board {
        let mut board = Board::new();
        for (index, player) in marks {
            if let Some(pos) = Position::from_index(*index) {
                board = board.with_mark(pos, *player);
            }
        }
        board
    }

    #[test]
    fn test_takes_center_after_corner_opening() {
        let board = board_from(&[(0, Player::X)]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            choose_with_tactic(&board, Player::O, &mut rng),
            Some((Position::Center, Tactic::Center))
        );
    }

    #[test]
    fn test_blocks_open_row() {
        let board = board_from(&[(0, Player::X), (1, Player::X)]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            choose_with_tactic(&board, Player::O, &mut rng),
            Some((Position::TopRight, Tactic::Block))
        );
    }

    #[test]
    fn test_win_beats_block() {
        // O can finish the middle row; X threatens the top row.
        let board = board_from(&[
            (0, Player::X),
            (1, Player::X),
            (3, Player::O),
            (4, Player::O),
            (8, Player::X),
        ]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            choose_with_tactic(&board, Player::O, &mut rng),
            Some((Position::MiddleRight, Tactic::Win))
        );
    }

    #[test]
    fn test_lowest_index_win_first() {
        // O completes either column 0 (via 6) or the top row (via 2).
        let board = board_from(&[(0, Player::O), (1, Player::O), (3, Player::O)]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(choose_move(&board, Player::O, &mut rng), Some(Position::TopRight));
    }

    #[test]
    fn test_corner_when_center_taken() {
        let board = board_from(&[(4, Player::X)]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (pos, tactic) = choose_with_tactic(&board, Player::O, &mut rng)
                .expect("corners are free");
            assert_eq!(tactic, Tactic::Corner);
            assert!(Position::CORNERS.contains(&pos));
        }
    }

    #[test]
    fn test_side_when_corners_and_center_taken() {
        // X O X / _ X _ / O X O: neither 3 nor 5 completes a line.
        let board = board_from(&[
            (0, Player::X),
            (1, Player::O),
            (2, Player::X),
            (4, Player::X),
            (6, Player::O),
            (7, Player::X),
            (8, Player::O),
        ]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (pos, tactic) = choose_with_tactic(&board, Player::O, &mut rng)
                .expect("sides are free");
            assert_eq!(tactic, Tactic::Side);
            assert!(matches!(pos, Position::MiddleLeft | Position::MiddleRight));
        }
    }

    #[test]
    fn test_full_board_returns_none() {
        let mut board = Board::new();
        for (index, pos) in Position::ALL.iter().enumerate() {
            let player = if index % 2 == 0 { Player::X } else { Player::O };
            board = board.with_mark(*pos, player);
        }
        let mut opponent = HeuristicOpponent::seeded(3);
        assert_eq!(opponent.choose_move(&board, Player::O), None);
    }

    #[test]
    fn test_seeded_opponents_agree() {
        let board = board_from(&[(4, Player::X)]);
        let mut a = HeuristicOpponent::seeded(42);
        let mut b = HeuristicOpponent::seeded(42);
        assert_eq!(a.choose_move(&board, Player::O), b.choose_move(&board, Player::O));
    }
}
