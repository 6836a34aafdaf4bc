//! Async driver: one task owns the session and times the computer's move.
//!
//! Commands arrive over an unbounded channel and are applied in order.
//! When the controller issues an [`OpponentTicket`] the driver arms a
//! single timer; the ticket is redeemed when the timer fires. Any state
//! change that retires the ticket also disarms the timer, and a ticket
//! that went stale anyway is rejected by the controller. Dropping the
//! event receiver does not stop the session; `view()` keeps working.

use crate::config::SessionConfig;
use crate::error::SessionClosed;
use crate::session::{GameSession, SessionCommand, SessionEvent, SessionView};
use crate::theme::Theme;
use anyhow::Result;
use libardo_tictactoe::{Mode, OpponentTicket};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument};

/// Message from a [`SessionHandle`] to the driver task.
#[derive(Debug)]
enum Request {
    Command(SessionCommand),
    View(oneshot::Sender<SessionView>),
    Shutdown,
}

// ─────────────────────────────────────────────────────────────
//  Driver
// ─────────────────────────────────────────────────────────────

/// Runs a [`GameSession`] on the current tokio runtime.
pub struct GameDriver {
    session: GameSession,
    delay: Duration,
    requests: mpsc::UnboundedReceiver<Request>,
    events: mpsc::UnboundedSender<SessionEvent>,
    armed: Option<(OpponentTicket, Instant)>,
}

impl GameDriver {
    /// Spawns a driver for `session` and returns its handle, event stream
    /// and task.
    #[instrument(skip(session))]
    pub fn spawn(
        session: GameSession,
        delay: Duration,
    ) -> (
        SessionHandle,
        mpsc::UnboundedReceiver<SessionEvent>,
        JoinHandle<Result<()>>,
    ) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let driver = Self {
            session,
            delay,
            requests: request_rx,
            events: event_tx,
            armed: None,
        };
        let task = tokio::spawn(driver.run());
        (SessionHandle { requests: request_tx }, event_rx, task)
    }

    /// Processes requests until shutdown or until every handle is dropped.
    async fn run(mut self) -> Result<()> {
        info!(delay_ms = self.delay.as_millis() as u64, "Session started");
        self.rearm();

        loop {
            let deadline = self.armed.map(|(_, at)| at);
            tokio::select! {
                biased;

                request = self.requests.recv() => match request {
                    Some(Request::Command(command)) => {
                        let events = self.session.handle(command);
                        self.publish(events);
                    }
                    Some(Request::View(reply)) => {
                        if reply.send(self.session.view()).is_err() {
                            debug!("View requester went away");
                        }
                    }
                    Some(Request::Shutdown) | None => {
                        info!("Session shutting down");
                        return Ok(());
                    }
                },

                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((ticket, _)) = self.armed.take() {
                        debug!(generation = ticket.generation(), "Opponent delay elapsed");
                        let events = self.session.play_opponent(ticket);
                        self.publish(events);
                    }
                }
            }

            self.rearm();
        }
    }

    /// Aligns the timer with the controller's outstanding ticket.
    fn rearm(&mut self) {
        let pending = self.session.controller().pending_opponent_move();
        match (pending, self.armed) {
            (Some(ticket), Some((armed, _))) if ticket == armed => {}
            (Some(ticket), _) => {
                debug!(generation = ticket.generation(), "Armed opponent timer");
                self.armed = Some((ticket, Instant::now() + self.delay));
            }
            (None, Some((stale, _))) => {
                debug!(generation = stale.generation(), "Disarmed opponent timer");
                self.armed = None;
            }
            (None, None) => {}
        }
    }

    /// Forwards events; a dropped receiver only silences the stream.
    fn publish(&self, events: Vec<SessionEvent>) {
        if self.events.is_closed() {
            debug!(dropped = events.len(), "No event receiver, skipping events");
            return;
        }
        for event in events {
            if self.events.send(event).is_err() {
                debug!("Event receiver went away");
                return;
            }
        }
    }
}

/// Spawns a session configured by `config`.
#[instrument(skip(config))]
pub fn spawn(
    config: &SessionConfig,
) -> (
    SessionHandle,
    mpsc::UnboundedReceiver<SessionEvent>,
    JoinHandle<Result<()>>,
) {
    GameDriver::spawn(GameSession::from_config(config), config.opponent_delay())
}

// ─────────────────────────────────────────────────────────────
//  Handle
// ─────────────────────────────────────────────────────────────

/// Cheap, cloneable front door to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    requests: mpsc::UnboundedSender<Request>,
}

impl SessionHandle {
    /// Queues a command.
    pub fn send(&self, command: SessionCommand) -> Result<(), SessionClosed> {
        self.requests
            .send(Request::Command(command))
            .map_err(|_| SessionClosed)
    }

    /// Clicks cell `cell` (0-8).
    pub fn apply_move(&self, cell: usize) -> Result<(), SessionClosed> {
        self.send(SessionCommand::ApplyMove(cell))
    }

    /// Time-travels to `step`.
    pub fn jump_to(&self, step: usize) -> Result<(), SessionClosed> {
        self.send(SessionCommand::JumpTo(step))
    }

    /// Clears the board, keeping the mode.
    pub fn reset(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Reset)
    }

    /// Clears the board and returns to two players.
    pub fn new_game(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::NewGame)
    }

    /// Selects a mode.
    pub fn set_mode(&self, mode: Mode) -> Result<(), SessionClosed> {
        self.send(SessionCommand::SetMode(mode))
    }

    /// Flips the mode.
    pub fn toggle_mode(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::ToggleMode)
    }

    /// Selects and persists a theme.
    pub fn set_theme(&self, theme: Theme) -> Result<(), SessionClosed> {
        self.send(SessionCommand::SetTheme(theme))
    }

    /// Closes the result dialog.
    pub fn dismiss_notice(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::DismissNotice)
    }

    /// Fetches the current render view, after every queued command.
    pub async fn view(&self) -> Result<SessionView, SessionClosed> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.requests
            .send(Request::View(reply_tx))
            .map_err(|_| SessionClosed)?;
        reply_rx.await.map_err(|_| SessionClosed)
    }

    /// Asks the driver to stop.
    pub fn shutdown(&self) -> Result<(), SessionClosed> {
        self.requests
            .send(Request::Shutdown)
            .map_err(|_| SessionClosed)
    }
}
