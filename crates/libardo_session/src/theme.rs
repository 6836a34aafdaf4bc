//! Visual themes and the single persisted theme slot.
//!
//! The slot holds a raw string. Anything missing, unreadable or not in
//! the theme set falls back to the default theme; nothing here fails a
//! caller.

use crate::error::PreferencesError;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// The fixed set of themes.
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
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Dark background (default).
    #[default]
    Dark,
    /// Light background.
    Light,
    /// Pale blues.
    Ice,
    /// Greens.
    Nature,
    /// Reds and oranges.
    Fire,
}

impl Theme {
    /// Parses a stored value, falling back to `default` when absent or
    /// unrecognised.
    #[instrument]
    pub fn from_stored(value: Option<&str>, default: Theme) -> Theme {
        match value.map(Theme::from_str) {
            Some(Ok(theme)) => theme,
            Some(Err(_)) => {
                warn!(?value, %default, "Unrecognised stored theme");
                default
            }
            None => default,
        }
    }

    /// Capitalised button label.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Ice => "Ice",
            Theme::Nature => "Nature",
            Theme::Fire => "Fire",
        }
    }
}

/// A single key-value slot holding the last selected theme.
pub trait ThemeStore: Send {
    /// Reads the raw stored value, `None` if nothing was ever written.
    fn load(&self) -> Result<Option<String>, PreferencesError>;

    /// Overwrites the stored value.
    fn save(&mut self, value: &str) -> Result<(), PreferencesError>;
}

/// In-memory slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    value: Option<String>,
}

impl MemoryThemeStore {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with a raw value.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// The raw value, for inspection.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<String>, PreferencesError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &str) -> Result<(), PreferencesError> {
        self.value = Some(value.to_string());
        Ok(())
    }
}

/// On-disk form of the slot.
#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: Option<String>,
}

/// Slot backed by a small TOML file with a single `theme` key.
#[derive(Debug, Clone, new)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    /// Path of the backing file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<String>, PreferencesError> {
        if !self.path.exists() {
            debug!("No preferences file yet");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let file: ThemeFile = toml::from_str(&content)?;
        Ok(file.theme)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn save(&mut self, value: &str) -> Result<(), PreferencesError> {
        let content = toml::to_string(&ThemeFile {
            theme: Some(value.to_string()),
        })?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// The selected theme plus the slot it is persisted to.
pub struct ThemePreference {
    store: Box<dyn ThemeStore>,
    current: Theme,
}

impl ThemePreference {
    /// Reads the slot once at startup, falling back to `default`.
    #[instrument(skip(store))]
    pub fn load(store: Box<dyn ThemeStore>, default: Theme) -> Self {
        let stored = match store.load() {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, "Could not read stored theme");
                None
            }
        };
        let current = Theme::from_stored(stored.as_deref(), default);
        info!(theme = %current, "Theme loaded");
        Self { store, current }
    }

    /// The selected theme.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Selects a theme and writes it to the slot.
    ///
    /// A failed write is logged; the selection still takes effect.
    #[instrument(skip(self), fields(from = %self.current))]
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(error) = self.store.save(&theme.to_string()) {
            warn!(%error, "Could not persist theme");
        }
    }
}

impl std::fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreference")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        use strum::IntoEnumIterator;
        for theme in Theme::iter() {
            assert_eq!(Theme::from_stored(Some(&theme.to_string()), Theme::Dark), theme);
        }
    }

    #[test]
    fn test_labels_are_capitalised() {
        assert_eq!(Theme::Nature.label(), "Nature");
        use strum::IntoEnumIterator;
        for theme in Theme::iter() {
            assert_eq!(theme.label().to_lowercase(), theme.to_string());
        }
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(Theme::from_stored(None, Theme::Dark), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("neon"), Theme::Dark), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("Fire"), Theme::Light), Theme::Light);
        assert_eq!(Theme::from_stored(Some("fire"), Theme::Light), Theme::Fire);
    }

    #[test]
    fn test_preference_reads_slot() {
        let pref = ThemePreference::load(Box::new(MemoryThemeStore::with_value("ice")), Theme::Dark);
        assert_eq!(pref.current(), Theme::Ice);
    }

    #[test]
    fn test_corrupt_slot_uses_default() {
        let pref = ThemePreference::load(
            Box::new(MemoryThemeStore::with_value("\u{0}garbage")),
            Theme::Dark,
        );
        assert_eq!(pref.current(), Theme::Dark);
    }

    struct BrokenStore;

    impl ThemeStore for BrokenStore {
        fn load(&self) -> Result<Option<String>, PreferencesError> {
            Err(PreferencesError::new("disk on fire"))
        }

        fn save(&mut self, _value: &str) -> Result<(), PreferencesError> {
            Err(PreferencesError::new("disk on fire"))
        }
    }

    #[test]
    fn test_broken_store_never_fails_caller() {
        let mut pref = ThemePreference::load(Box::new(BrokenStore), Theme::Nature);
        assert_eq!(pref.current(), Theme::Nature);
        pref.set(Theme::Fire);
        assert_eq!(pref.current(), Theme::Fire);
    }
}
