//! Pure tic-tac-toe game logic.
//!
//! # Architecture
//!
//! - **Rules**: total, side-effect free win/draw detection
//! - **History**: append-only board log with a time-travel cursor
//! - **Heuristic**: fixed-priority computer opponent
//! - **Controller**: turn gating, mode, and the deferred-move ticket
//!
//! # Example
//!
//! ```
//! use libardo_tictactoe::{GameController, GameStatus, HeuristicOpponent, Mode, Player};
//!
//! let mut game = GameController::with_opponent(HeuristicOpponent::seeded(1));
//! game.set_mode(Mode::HumanVsHeuristic);
//! assert!(game.apply_move(0));
//!
//! let ticket = game.pending_opponent_move().expect("computer to move");
//! game.play_opponent_move(ticket);
//! assert_eq!(game.status(), GameStatus::NextTurn(Player::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod controller;
pub mod heuristic;
mod history;
pub mod invariants;
mod mode;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use controller::{GameController, GameSnapshot, MoveListEntry, OpponentTicket};
pub use heuristic::{HeuristicOpponent, Tactic, choose_move};
pub use history::History;
pub use invariants::{Invariant, InvariantSet, InvariantViolation};
pub use mode::Mode;
pub use position::Position;
pub use rules::{check_winner, is_draw, is_full, is_terminal};
pub use types::{Board, GameStatus, Player, Square};

/// Alias matching the game's vocabulary: a cell holds a mark.
pub type Mark = Player;
