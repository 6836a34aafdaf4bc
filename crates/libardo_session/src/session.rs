//! A game session: the controller plus the UI-facing bookkeeping around it.
//!
//! Everything here is synchronous. The driver feeds commands in and
//! forwards the resulting events; tests can do the same by hand.

use crate::config::SessionConfig;
use crate::notice::{Notice, NoticeTracker};
use crate::theme::{FileThemeStore, MemoryThemeStore, Theme, ThemePreference, ThemeStore};
use libardo_tictactoe::{
    GameController, GameSnapshot, HeuristicOpponent, Mode, Move, OpponentTicket, Player, Position,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    /// Click on a cell (0-8).
    ApplyMove(usize),
    /// Click on a time-travel entry.
    JumpTo(usize),
    /// Clear the board, keep the mode.
    Reset,
    /// Clear the board and go back to two players.
    NewGame,
    /// Choose a mode.
    SetMode(Mode),
    /// Flip the mode.
    ToggleMode,
    /// Choose a theme.
    SetTheme(Theme),
    /// Close the result dialog.
    DismissNotice,
}

/// Something the renderer should react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Game state updated.
    StateChanged(GameSnapshot),
    /// The computer will move after its delay.
    OpponentThinking(OpponentTicket),
    /// A mark was placed.
    MoveMade(Move),
    /// The current position is won or drawn.
    GameOver {
        /// Winner, `None` for a draw.
        winner: Option<Player>,
    },
    /// A result dialog appeared.
    NoticeShown(Notice),
    /// The result dialog went away.
    NoticeHidden,
    /// The theme changed.
    ThemeChanged(Theme),
}

/// Full render view: game, dialog and theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// Game state.
    pub game: GameSnapshot,
    /// Visible dialog.
    pub notice: Option<Notice>,
    /// Selected theme.
    pub theme: Theme,
}

/// Controller, result dialogs and theme for one player's screen.
#[derive(Debug)]
pub struct GameSession {
    controller: GameController,
    notices: NoticeTracker,
    theme: ThemePreference,
}

impl GameSession {
    /// Builds a session from parts.
    #[instrument(skip_all)]
    pub fn new(controller: GameController, theme: ThemePreference) -> Self {
        Self {
            controller,
            notices: NoticeTracker::new(),
            theme,
        }
    }

    /// Builds a session as described by `config`.
    #[instrument(skip(config), fields(delay_ms = *config.opponent_delay_ms()))]
    pub fn from_config(config: &SessionConfig) -> Self {
        let opponent = match config.opponent_seed() {
            Some(seed) => HeuristicOpponent::seeded(*seed),
            None => HeuristicOpponent::new(),
        };
        let store: Box<dyn ThemeStore> = match config.theme_file() {
            Some(path) => Box::new(FileThemeStore::new(path.clone())),
            None => Box::new(MemoryThemeStore::new()),
        };
        let theme = ThemePreference::load(store, *config.default_theme());
        Self::new(GameController::with_opponent(opponent), theme)
    }

    /// The game controller.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Render view of everything.
    pub fn view(&self) -> SessionView {
        SessionView {
            game: self.controller.snapshot(),
            notice: self.notices.visible(),
            theme: self.theme.current(),
        }
    }

    /// Applies one user action and returns what changed.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: SessionCommand) -> Vec<SessionEvent> {
        let before = self.controller.snapshot();
        let pending_before = self.controller.pending_opponent_move();
        let notice_before = self.notices.visible();
        let mut events = Vec::new();

        match command {
            SessionCommand::ApplyMove(cell) => {
                let mover = self.controller.to_move();
                if self.controller.apply_move(cell)
                    && let Some(position) = Position::from_index(cell)
                {
                    events.push(SessionEvent::MoveMade(Move::new(mover, position)));
                }
            }
            SessionCommand::JumpTo(step) => {
                self.controller.jump_to(step);
            }
            SessionCommand::Reset => {
                self.controller.reset();
                self.notices.clear();
            }
            SessionCommand::NewGame => {
                self.controller.new_game();
                self.notices.clear();
            }
            SessionCommand::SetMode(mode) => self.controller.set_mode(mode),
            SessionCommand::ToggleMode => self.controller.toggle_mode(),
            SessionCommand::SetTheme(theme) => {
                self.theme.set(theme);
                info!(%theme, "Theme changed");
                events.push(SessionEvent::ThemeChanged(theme));
                return events;
            }
            SessionCommand::DismissNotice => {
                if self.notices.visible().is_some() {
                    self.notices.dismiss();
                    events.push(SessionEvent::NoticeHidden);
                }
                return events;
            }
        }

        self.after_change(before, pending_before, notice_before, &mut events);
        events
    }

    /// Redeems an opponent ticket and returns what changed.
    #[instrument(skip(self))]
    pub fn play_opponent(&mut self, ticket: OpponentTicket) -> Vec<SessionEvent> {
        let before = self.controller.snapshot();
        let notice_before = self.notices.visible();
        let mut events = Vec::new();
        match self.controller.play_opponent_move(ticket) {
            Some(action) => events.push(SessionEvent::MoveMade(action)),
            None => {
                debug!("Opponent move discarded");
                return events;
            }
        }
        self.after_change(before, Some(ticket), notice_before, &mut events);
        events
    }

    /// Emits state, game-over, notice and thinking events for a change.
    fn after_change(
        &mut self,
        before: GameSnapshot,
        pending_before: Option<OpponentTicket>,
        notice_before: Option<Notice>,
        events: &mut Vec<SessionEvent>,
    ) {
        let after = self.controller.snapshot();
        if after == before
            && self.controller.pending_opponent_move() == pending_before
            && self.notices.visible() == notice_before
        {
            return;
        }

        let status = after.status;
        events.push(SessionEvent::StateChanged(after));

        if status.is_terminal() && status != before.status {
            events.push(SessionEvent::GameOver {
                winner: status.winner(),
            });
        }

        match self.notices.observe(status) {
            Some(notice) => events.push(SessionEvent::NoticeShown(notice)),
            None if notice_before.is_some() && self.notices.visible().is_none() => {
                events.push(SessionEvent::NoticeHidden)
            }
            None => {}
        }

        if let Some(ticket) = self.controller.pending_opponent_move()
            && Some(ticket) != pending_before
        {
            events.push(SessionEvent::OpponentThinking(ticket));
        }
    }
}
