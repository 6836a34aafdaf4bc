//! Session configuration loaded from TOML.

use crate::error::ConfigError;
use crate::theme::Theme;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long the computer "thinks" before moving, in milliseconds.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Theme used when nothing valid is stored.
    #[serde(default)]
    default_theme: Theme,

    /// Fixed RNG seed for the computer's corner/side picks.
    #[serde(default)]
    opponent_seed: Option<u64>,

    /// File backing the theme slot; in-memory when unset.
    #[serde(default)]
    theme_file: Option<PathBuf>,
}

#[instrument]
fn default_opponent_delay_ms() -> u64 {
    300
}

impl SessionConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(delay_ms = config.opponent_delay_ms, "Config loaded successfully");
        Ok(config)
    }

    /// Like [`SessionConfig::from_file`], but a missing file yields defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// The thinking delay as a duration.
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Returns a copy with a different thinking delay.
    pub fn with_opponent_delay(mut self, delay: Duration) -> Self {
        self.opponent_delay_ms = delay.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Returns a copy with a fixed opponent seed.
    pub fn with_opponent_seed(mut self, seed: u64) -> Self {
        self.opponent_seed = Some(seed);
        self
    }

    /// Returns a copy that persists the theme to `path`.
    pub fn with_theme_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.theme_file = Some(path.into());
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: default_opponent_delay_ms(),
            default_theme: Theme::default(),
            opponent_seed: None,
            theme_file: None,
        }
    }
}
