//! Session shell around the tic-tac-toe core.
//!
//! # Architecture
//!
//! - **Session**: synchronous controller + result dialogs + theme
//! - **Driver**: single tokio task that times the computer's move
//! - **Theme**: persisted preference behind a [`ThemeStore`]
//! - **Config**: TOML settings with defaults
//!
//! # Example
//!
//! ```no_run
//! use libardo_session::{SessionConfig, spawn};
//! use libardo_tictactoe::Mode;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let (handle, mut events, task) = spawn(&SessionConfig::default());
//! handle.set_mode(Mode::HumanVsHeuristic)?;
//! handle.apply_move(4)?;
//! while let Some(event) = events.recv().await {
//!     println!("{:?}", event);
//! }
//! handle.shutdown()?;
//! task.await??;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod driver;
mod error;
mod notice;
mod session;
mod theme;

pub use config::SessionConfig;
pub use driver::{GameDriver, SessionHandle, spawn};
pub use error::{ConfigError, PreferencesError, SessionClosed};
pub use notice::{Notice, NoticeTracker};
pub use session::{GameSession, SessionCommand, SessionEvent, SessionView};
pub use theme::{FileThemeStore, MemoryThemeStore, Theme, ThemePreference, ThemeStore};

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
