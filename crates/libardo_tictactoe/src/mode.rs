//! Who controls the marks.

use super::Player;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Game mode.
///
/// Defaults to [`Mode::HumanVsHuman`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Mode {
    /// Both marks are played from the same UI.
    #[default]
    HumanVsHuman,
    /// X is human, O is played by the heuristic opponent.
    HumanVsHeuristic,
}

impl Mode {
    /// The mark played by the computer in this mode, if any.
    pub fn computer_mark(self) -> Option<Player> {
        match self {
            Self::HumanVsHuman => None,
            Self::HumanVsHeuristic => Some(Player::O),
        }
    }

    /// Whether a human may place `player`'s mark in this mode.
    pub fn is_human(self, player: Player) -> bool {
        self.computer_mark() != Some(player)
    }

    /// Returns the button label for this mode.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::HumanVsHuman => "Play vs Computer",
            Self::HumanVsHeuristic => "Playing vs Computer (O)",
        }
    }

    /// Toggles between the two modes.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::HumanVsHuman => Self::HumanVsHeuristic,
            Self::HumanVsHeuristic => Self::HumanVsHuman,
        }
    }
}
