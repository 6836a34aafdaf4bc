//! Alternating mark invariant: X, O, X, O, ... across history entries.

use super::super::{History, Player};
use super::{Invariant, diff};

/// Invariant: the mark added by entry *n* belongs to the player whose
/// turn it was at step *n-1*. X fills odd entries, O fills even ones.
pub struct AlternatingMarkInvariant;

impl Invariant<History> for AlternatingMarkInvariant {
    fn holds(history: &History) -> bool {
        history
            .entries()
            .windows(2)
            .enumerate()
            .all(|(step, pair)| {
                let (added, _) = diff(&pair[0], &pair[1]);
                added.iter().all(|index| {
                    pair[1].square_at(*index).and_then(|sq| sq.player())
                        == Some(Player::for_step(step))
                })
            })
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
