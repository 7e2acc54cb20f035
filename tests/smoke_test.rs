// Chunk: docs/chunks/terminal_host - Terminal popup host
//!
//! Smoke test for the terminal host.
//!
//! Drives the app with synthetic terminal events, from a snapshot file on disk
//! to the chosen tab. The real terminal is never touched.

use std::fs;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use tabfzf::app::{App, Exit};
use tabfzf::platform::SnapshotPlatform;
use tabfzf::terminal::TerminalFocusHost;
use tabfzf_switcher::{
    FileStore, KeyValueStore, Popup, SettingsPanel, SwitcherConfig, TabId, ThemeBook,
};

const SNAPSHOT: &str = r#"[
    {"id": 11, "windowId": 1, "title": "Inbox", "url": "https://mail.example.com/", "active": true},
    {"id": 12, "windowId": 1, "title": "GitHub", "url": "https://github.com/"},
    {"id": 13, "windowId": 2, "title": "Gitea", "url": "https://gitea.io/"},
    {"id": 14, "windowId": 2, "title": "", "url": "file:///tmp/notes.txt"}
]"#;

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

fn app_in(dir: &TempDir) -> App {
    let path = dir.path().join("tabs.json");
    fs::write(&path, SNAPSHOT).unwrap();
    let mut platform = SnapshotPlatform::from_reader(fs::File::open(&path).unwrap()).unwrap();

    let store = FileStore::in_dir(dir.path());
    let settings = SettingsPanel::new(ThemeBook::load(&store, 0));
    let mut host = TerminalFocusHost::new();
    let popup = Popup::open(&mut platform, &SwitcherConfig::default(), &mut host);
    App::new(popup, settings, platform, host, Box::new(store))
}

#[test]
fn test_type_and_pick_second_match() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    for ch in "git".chars() {
        app.handle_terminal_event(key(KeyCode::Char(ch), KeyModifiers::NONE));
    }
    app.handle_terminal_event(key(KeyCode::Char('n'), KeyModifiers::ALT));
    app.handle_terminal_event(key(KeyCode::Enter, KeyModifiers::NONE));

    match app.exit() {
        Some(Exit::Activated(tab)) => assert_eq!(tab.id, TabId(13)),
        other => panic!("expected activation, got {other:?}"),
    }
}

#[test]
fn test_untitled_tab_is_searchable() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    for ch in "untitled".chars() {
        app.handle_terminal_event(key(KeyCode::Char(ch), KeyModifiers::NONE));
    }
    let rows = app.popup.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].domain, "(local)");
    assert_eq!(rows[0].title, "(untitled)");
}

#[test]
fn test_theme_choice_is_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = app_in(&dir);
        app.handle_terminal_event(key(KeyCode::F(2), KeyModifiers::NONE));
        app.handle_terminal_event(key(KeyCode::Down, KeyModifiers::NONE));
        app.handle_terminal_event(key(KeyCode::Enter, KeyModifiers::NONE));
    }

    let store = FileStore::in_dir(dir.path());
    assert_eq!(
        store.get("tabfzf.selectedThemeId.v1").as_deref(),
        Some("win98-foot-light")
    );
}
