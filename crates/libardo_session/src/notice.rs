//! Result notices: the "X wins!" / "It's a tie" dialogs.
//!
//! A notice appears once per transition into a won or drawn position,
//! can be dismissed, and disappears on its own once the position no
//! longer holds (time travel, reset).

use libardo_tictactoe::{GameStatus, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A dialog the renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notice {
    /// The given player won.
    Win(Player),
    /// No more moves, no winner.
    Draw,
}

impl Notice {
    /// Dialog title.
    pub fn title(&self) -> &'static str {
        match self {
            Notice::Win(_) => "Winner",
            Notice::Draw => "Draw",
        }
    }

    /// Dialog body.
    pub fn message(&self) -> String {
        match self {
            Notice::Win(player) => format!("{} wins!", player),
            Notice::Draw => "It's a tie. No more moves left.".to_string(),
        }
    }
}

/// Tracks which notice is visible and which transitions were already
/// announced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeTracker {
    visible: Option<Notice>,
    announced_winner: Option<Player>,
    announced_draw: bool,
}

impl NoticeTracker {
    /// Creates a tracker with nothing shown.
    pub fn new() -> Self {
        Self::default()
    }

    /// The notice currently shown.
    pub fn visible(&self) -> Option<Notice> {
        self.visible
    }

    /// Feeds the status after a state change.
    ///
    /// Returns the notice if this call made it appear.
    #[instrument(skip(self))]
    pub fn observe(&mut self, status: GameStatus) -> Option<Notice> {
        match status {
            GameStatus::Winner(player) => {
                self.announced_draw = false;
                if self.announced_winner == Some(player) {
                    return None;
                }
                self.announced_winner = Some(player);
                self.show(Notice::Win(player))
            }
            GameStatus::Draw => {
                self.announced_winner = None;
                if self.announced_draw {
                    return None;
                }
                self.announced_draw = true;
                self.show(Notice::Draw)
            }
            GameStatus::NextTurn(_) => {
                self.clear();
                None
            }
        }
    }

    /// Hides the current notice without forgetting it was announced.
    pub fn dismiss(&mut self) {
        if let Some(notice) = self.visible.take() {
            debug!(?notice, "Notice dismissed");
        }
    }

    /// Hides everything and forgets past announcements.
    pub fn clear(&mut self) {
        self.visible = None;
        self.announced_winner = None;
        self.announced_draw = false;
    }

    fn show(&mut self, notice: Notice) -> Option<Notice> {
        debug!(?notice, "Showing notice");
        self.visible = Some(notice);
        Some(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_shown_once() {
        let mut tracker = NoticeTracker::new();
        assert_eq!(tracker.observe(GameStatus::Winner(Player::X)), Some(Notice::Win(Player::X)));
        assert_eq!(tracker.observe(GameStatus::Winner(Player::X)), None);
        assert_eq!(tracker.visible(), Some(Notice::Win(Player::X)));
    }

    #[test]
    fn test_dismiss_stays_dismissed() {
        let mut tracker = NoticeTracker::new();
        tracker.observe(GameStatus::Draw);
        tracker.dismiss();
        assert_eq!(tracker.observe(GameStatus::Draw), None);
        assert_eq!(tracker.visible(), None);
    }

    #[test]
    fn test_auto_hides_when_condition_ends() {
        let mut tracker = NoticeTracker::new();
        tracker.observe(GameStatus::Winner(Player::O));
        tracker.observe(GameStatus::NextTurn(Player::X));
        assert_eq!(tracker.visible(), None);
        // Returning to the won position announces again.
        assert_eq!(tracker.observe(GameStatus::Winner(Player::O)), Some(Notice::Win(Player::O)));
    }

    #[test]
    fn test_messages() {
        assert_eq!(Notice::Win(Player::X).message(), "X wins!");
        assert_eq!(Notice::Draw.title(), "Draw");
    }
}
