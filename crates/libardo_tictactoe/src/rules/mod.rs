//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating board state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the history, the controller and the heuristic can all
//! share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full, is_terminal, status_of};
pub use win::{LINES, check_winner, completes_line};
