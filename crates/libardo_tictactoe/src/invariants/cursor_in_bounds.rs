//! Cursor invariant: the viewed step always names an existing entry.

use super::super::History;
use super::Invariant;

/// Invariant: `0 <= current_step < len` and the log is never empty.
pub struct CursorInBoundsInvariant;

impl Invariant<History> for CursorInBoundsInvariant {
    fn holds(history: &History) -> bool {
        !history.is_empty() && history.current_step() < history.len()
    }

    fn description() -> &'static str {
        "Current step indexes an existing history entry"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Position};

    #[test]
    fn test_jumps_stay_in_bounds() {
        let mut history = History::new();
        history.place(Position::Center);
        history.jump_to(0);
        assert!(CursorInBoundsInvariant::holds(&history));
        history.jump_to(7);
        assert!(CursorInBoundsInvariant::holds(&history));
    }

    #[test]
    fn test_dangling_cursor_violates() {
        let history = History::from_raw(vec![Board::new()], 1);
        assert!(!CursorInBoundsInvariant::holds(&history));
    }
}
