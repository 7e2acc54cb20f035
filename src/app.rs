// Chunk: docs/chunks/terminal_host - Terminal popup host
//!
//! The terminal event loop around a [`Popup`].
//!
//! [`App`] owns the popup, the settings panel and the host-side services.
//! Terminal events are translated into popup events; keys the popup leaves
//! unhandled in the settings and help views drive those views here.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, MouseEvent as TermMouseEvent,
};
use crossterm::terminal;
use tracing::debug;

use tabfzf_input::{Key, MouseEvent};
use tabfzf_switcher::{
    FocusDeferral, KeyValueStore, Popup, PopupEvent, PopupOutcome, SettingsPanel, Tab,
    View,
};

use crate::platform::{SnapshotPlatform, TerminalCommands};
use crate::render::{self, ListLayout};
use crate::terminal::{convert_key, convert_mouse_kind, TerminalFocusHost};

/// Longest the loop blocks when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// How the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// A tab was activated.
    Activated(Tab),
    /// The popup was closed without switching.
    Cancelled,
}

pub struct App {
    pub popup: Popup,
    pub settings: SettingsPanel,
    pub platform: SnapshotPlatform,
    pub host: TerminalFocusHost,
    store: Box<dyn KeyValueStore>,
    commands: TerminalCommands,
    /// Highlighted theme in the settings view.
    settings_cursor: usize,
    layout: ListLayout,
}

impl App {
    pub fn new(
        popup: Popup,
        settings: SettingsPanel,
        platform: SnapshotPlatform,
        host: TerminalFocusHost,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        Self {
            popup,
            settings,
            platform,
            host,
            store,
            commands: TerminalCommands,
            settings_cursor: 0,
            layout: ListLayout::default(),
        }
    }

    pub fn settings_cursor(&self) -> usize {
        self.settings_cursor
    }

    /// Runs until the popup closes.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<Exit> {
        loop {
            if let Some(exit) = self.exit() {
                return Ok(exit);
            }

            self.deliver_deferred(FocusDeferral::NextPaint);
            let size = terminal::size()?;
            self.layout = render::draw(out, &self.popup, &self.settings, self.settings_cursor, size)?;
            self.deliver_deferred(FocusDeferral::ZeroDelay);

            let now = Instant::now();
            if let Some(timer) = self.host.due_timer(now) {
                self.popup
                    .handle_event(PopupEvent::FocusRetryTick(timer), &mut self.host);
                continue;
            }

            if event::poll(self.host.poll_timeout(now, IDLE_POLL))? {
                let event = event::read()?;
                self.handle_terminal_event(event);
            }
        }
    }

    /// The exit state, once the popup has closed.
    pub fn exit(&self) -> Option<Exit> {
        if !self.popup.is_closed() {
            return None;
        }
        Some(match self.platform.activated() {
            Some(tab) => Exit::Activated(tab.clone()),
            None => Exit::Cancelled,
        })
    }

    fn deliver_deferred(&mut self, when: FocusDeferral) {
        while self.host.take_deferred(when) {
            self.popup.handle_event(PopupEvent::DeferredFocus, &mut self.host);
        }
    }

    /// Handles one terminal event.
    pub fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(&key),
            Event::Key(_) => {}
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::FocusGained => {
                self.host.set_window_focused(true);
                self.popup.handle_event(PopupEvent::WindowFocused, &mut self.host);
            }
            Event::FocusLost => self.host.set_window_focused(false),
            Event::Paste(text) => {
                self.popup.handle_event(PopupEvent::Text(text), &mut self.host);
            }
            Event::Resize(..) => {}
        }
        self.drive_outcome();
    }

    fn handle_key(&mut self, key: &TermKeyEvent) {
        if key.code == KeyCode::F(2) {
            self.toggle_settings();
            return;
        }

        let Some(event) = convert_key(key) else {
            return;
        };
        let handled = self
            .popup
            .handle_event(PopupEvent::Key(event.clone()), &mut self.host);
        if handled.is_handled() {
            return;
        }

        match (self.popup.view(), event.key) {
            (View::Settings, Key::Up) => self.move_settings_cursor(-1),
            (View::Settings, Key::Down) => self.move_settings_cursor(1),
            (View::Settings, Key::Return) => {
                if let Some(id) = self.theme_id_at_cursor() {
                    self.settings.apply_theme(self.store.as_mut(), &id);
                }
            }
            (View::Settings, Key::Delete) => {
                if let Some(id) = self.theme_id_at_cursor() {
                    self.settings.delete_theme(self.store.as_mut(), &id);
                    self.move_settings_cursor(0);
                }
            }
            (View::Settings | View::Help, Key::Escape) => {
                self.popup.handle_event(PopupEvent::BackToMain, &mut self.host);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: TermMouseEvent) {
        let Some(kind) = convert_mouse_kind(mouse.kind) else {
            return;
        };
        let Some(row) = self.layout.item_at(mouse.row, self.popup.visible_tabs().len()) else {
            return;
        };
        let event = MouseEvent {
            kind,
            row,
            modifiers: Default::default(),
        };
        self.popup.handle_event(PopupEvent::Mouse(event), &mut self.host);
    }

    fn toggle_settings(&mut self) {
        if self.popup.view() == View::Settings {
            self.popup.handle_event(PopupEvent::BackToMain, &mut self.host);
            return;
        }
        self.popup.handle_event(PopupEvent::OpenSettings, &mut self.host);
        if self.popup.view() == View::Settings {
            self.settings.open(&mut self.commands);
        }
    }

    fn move_settings_cursor(&mut self, delta: isize) {
        let count = self.settings.themes().themes().count();
        if count == 0 {
            self.settings_cursor = 0;
            return;
        }
        let next = (self.settings_cursor as isize + delta).rem_euclid(count as isize);
        self.settings_cursor = (next as usize).min(count - 1);
    }

    fn theme_id_at_cursor(&self) -> Option<String> {
        self.settings
            .themes()
            .themes()
            .nth(self.settings_cursor)
            .map(|theme| theme.id.clone())
    }

    /// Runs a requested activation against the snapshot platform.
    fn drive_outcome(&mut self) {
        if matches!(self.popup.pending_outcome(), Some(PopupOutcome::Activate(_))) {
            if let Some(result) = self.popup.activate_pending(&mut self.platform) {
                debug!(ok = result.is_ok(), "activation finished");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tabfzf_switcher::{MemoryStore, SwitcherConfig, TabId};

    fn app() -> App {
        let tabs = vec![
            Tab::new(1, 1).with_title("Inbox"),
            Tab::new(2, 1).with_title("GitHub").with_url("https://github.com/"),
            Tab::new(3, 1).with_title("Docs"),
        ];
        let mut platform = SnapshotPlatform::new(tabs, Some(TabId(1)));
        let mut host = TerminalFocusHost::new();
        let popup = Popup::open(&mut platform, &SwitcherConfig::default(), &mut host);
        App::new(
            popup,
            SettingsPanel::default(),
            platform,
            host,
            Box::new(MemoryStore::new()),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_terminal_event(Event::Key(TermKeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn enter_activates_selected_tab() {
        let mut app = app();
        for ch in "doc".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.exit(), Some(Exit::Activated(Tab::new(3, 1).with_title("Docs"))));
    }

    #[test]
    fn escape_cancels() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.exit(), Some(Exit::Cancelled));
    }

    #[test]
    fn settings_view_applies_theme() {
        let mut app = app();
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.popup.view(), View::Settings);
        assert!(app.settings.status().text.starts_with("No shortcut set."));

        press(&mut app, KeyCode::Down);
        assert_eq!(app.settings_cursor(), 1);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.settings.active_theme().id, "win98-foot-light");
        assert_eq!(app.settings.status().text, "Theme applied.");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.popup.view(), View::Main);
        assert_eq!(app.exit(), None);
    }

    #[test]
    fn paste_filters() {
        let mut app = app();
        app.handle_terminal_event(Event::Paste("git".into()));
        assert_eq!(app.popup.visible_tabs().len(), 1);
    }
}
