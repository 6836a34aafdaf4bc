//! Error types for the session shell.

use derive_more::{Display, Error};
use tracing::instrument;

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Error reading or writing the persisted theme slot.
#[derive(Debug, Clone, Display, Error)]
#[display("Preferences error: {} at {}:{}", message, file, line)]
pub struct PreferencesError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PreferencesError {
    /// Creates a new preferences error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for PreferencesError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<toml::de::Error> for PreferencesError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("Malformed preferences file: {}", err))
    }
}

impl From<toml::ser::Error> for PreferencesError {
    #[track_caller]
    fn from(err: toml::ser::Error) -> Self {
        Self::new(format!("Could not encode preferences: {}", err))
    }
}

/// The session task is no longer running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Game session has shut down")]
pub struct SessionClosed;
