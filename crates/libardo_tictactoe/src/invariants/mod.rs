//! First-class invariants for the move history.
//!
//! Invariants are logical properties that must hold after every change
//! to the history. They are checked in debug builds by the controller
//! and can be tested independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of two and three invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<_> = [$(($inv::holds(state), $inv::description())),+]
                    .into_iter()
                    .filter(|(holds, _)| !holds)
                    .map(|(_, description)| InvariantViolation::new(description))
                    .collect();

                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);

pub mod alternating_mark;
pub mod cursor_in_bounds;
pub mod single_cell_delta;

pub use alternating_mark::AlternatingMarkInvariant;
pub use cursor_in_bounds::CursorInBoundsInvariant;
pub use single_cell_delta::SingleCellDeltaInvariant;

/// All history invariants as a composable set.
pub type HistoryInvariants = (
    SingleCellDeltaInvariant,
    AlternatingMarkInvariant,
    CursorInBoundsInvariant,
);

/// Cells that went from empty to occupied between two snapshots, and
/// whether any cell changed in some other way.
pub(crate) fn diff(before: &crate::Board, after: &crate::Board) -> (Vec<usize>, bool) {
    use crate::Square;

    let mut added = Vec::new();
    let mut other_change = false;
    for (index, (a, b)) in before.squares().iter().zip(after.squares()).enumerate() {
        match (a, b) {
            (x, y) if x == y => {}
            (Square::Empty, Square::Occupied(_)) => added.push(index),
            _ => other_change = true,
        }
    }
    (added, other_change)
}
