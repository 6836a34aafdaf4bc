//! Theme persistence through a real file.

use libardo_session::{
    FileThemeStore, GameSession, SessionCommand, SessionConfig, Theme, ThemePreference, ThemeStore,
    init_tracing,
};
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_default() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let store = FileThemeStore::new(dir.path().join("prefs.toml"));
    assert_eq!(store.load().expect("readable"), None);

    let preference = ThemePreference::load(Box::new(store), Theme::Light);
    assert_eq!(preference.current(), Theme::Light);
}

#[test]
fn test_selection_survives_restart() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("prefs.toml");

    let mut preference = ThemePreference::load(Box::new(FileThemeStore::new(path.clone())), Theme::Dark);
    preference.set(Theme::Fire);

    let reloaded = ThemePreference::load(Box::new(FileThemeStore::new(path)), Theme::Dark);
    assert_eq!(reloaded.current(), Theme::Fire);
}

#[test]
fn test_garbage_in_file_falls_back() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("prefs.toml");

    std::fs::write(&path, "theme = \"neon\"\n").expect("write");
    let preference = ThemePreference::load(Box::new(FileThemeStore::new(path.clone())), Theme::Ice);
    assert_eq!(preference.current(), Theme::Ice);

    std::fs::write(&path, "this is not toml [[").expect("write");
    assert!(FileThemeStore::new(path.clone()).load().is_err());
    let preference = ThemePreference::load(Box::new(FileThemeStore::new(path)), Theme::Nature);
    assert_eq!(preference.current(), Theme::Nature);
}

#[test]
fn test_unwritable_slot_keeps_selection() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    // A directory where the file should be: every write fails.
    let path = dir.path().join("prefs.toml");
    std::fs::create_dir(&path).expect("mkdir");

    let mut preference = ThemePreference::load(Box::new(FileThemeStore::new(path)), Theme::Dark);
    preference.set(Theme::Light);
    assert_eq!(preference.current(), Theme::Light);
}

#[test]
fn test_session_writes_theme_file() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("prefs.toml");
    let config = SessionConfig::default().with_theme_file(&path);

    let mut session = GameSession::from_config(&config);
    assert_eq!(session.view().theme, Theme::Dark);
    session.handle(SessionCommand::SetTheme(Theme::Nature));

    let content = std::fs::read_to_string(&path).expect("theme file written");
    assert!(content.contains("nature"));
    assert_eq!(GameSession::from_config(&config).view().theme, Theme::Nature);
}
