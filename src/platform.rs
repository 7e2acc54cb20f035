// Chunk: docs/chunks/terminal_host - Terminal popup host
//!
//! Host-side stand-ins for the browser APIs.
//!
//! In a terminal there is no browser to ask, so the tab list comes from a JSON
//! snapshot (the shape browser tab APIs report) and "activating" a tab means
//! remembering it so `main` can print it.

use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use tabfzf_switcher::settings::shortcut::{Command, CommandRegistry};
use tabfzf_switcher::{PlatformError, Tab, TabId, TabPlatform, TabQuery, WindowId};

/// One entry of the snapshot file: a tab plus its optional `active` flag.
#[derive(Debug, Deserialize)]
struct TabRecord {
    #[serde(flatten)]
    tab: Tab,
    #[serde(default)]
    active: bool,
}

/// A tab platform over a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotPlatform {
    tabs: Vec<Tab>,
    active: Option<TabId>,
    activated: Option<Tab>,
}

impl SnapshotPlatform {
    pub fn new(tabs: Vec<Tab>, active: Option<TabId>) -> Self {
        Self {
            tabs,
            active,
            activated: None,
        }
    }

    /// Reads a JSON array of tabs.
    ///
    /// The first entry with `"active": true` becomes the active tab.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let records: Vec<TabRecord> = serde_json::from_reader(reader)?;
        let active = records.iter().find(|record| record.active).map(|record| record.tab.id);
        let tabs = records.into_iter().map(|record| record.tab).collect();
        Ok(Self::new(tabs, active))
    }

    /// Overrides the active tab.
    pub fn set_active(&mut self, tab: TabId) {
        self.active = Some(tab);
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// The tab activated through this platform, if any.
    pub fn activated(&self) -> Option<&Tab> {
        self.activated.as_ref()
    }
}

impl TabPlatform for SnapshotPlatform {
    fn query_tabs(&mut self, query: TabQuery) -> Result<Vec<Tab>, PlatformError> {
        let tabs = match query.active {
            Some(active) => self
                .tabs
                .iter()
                .filter(|tab| (Some(tab.id) == self.active) == active)
                .cloned()
                .collect(),
            None => self.tabs.clone(),
        };
        Ok(tabs)
    }

    fn activate_tab(&mut self, tab: TabId) -> Result<Tab, PlatformError> {
        let found = self
            .tabs
            .iter()
            .find(|candidate| candidate.id == tab)
            .cloned()
            .ok_or_else(|| PlatformError::message(format!("No tab with id: {tab}.")))?;
        debug!(tab = %tab, "snapshot tab activated");
        self.active = Some(tab);
        self.activated = Some(found.clone());
        Ok(found)
    }

    fn focus_window(&mut self, window: WindowId) -> Result<(), PlatformError> {
        if self.tabs.iter().any(|tab| tab.window_id == window) {
            Ok(())
        } else {
            Err(PlatformError::message(format!("No window with id: {window}.")))
        }
    }

    fn create_tab(&mut self, _url: &str) -> Result<Tab, PlatformError> {
        Err(PlatformError::Unavailable("Opening tabs"))
    }
}

/// A command registry for hosts without browser commands.
///
/// Lists no commands and rejects updates, so the settings view explains that
/// the shortcut has to be set in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalCommands;

impl CommandRegistry for TerminalCommands {
    fn commands(&mut self) -> Result<Vec<Command>, PlatformError> {
        Ok(Vec::new())
    }

    fn update_shortcut(&mut self, _name: &str, _shortcut: &str) -> Result<(), PlatformError> {
        Err(PlatformError::message(
            "Direct shortcut updates are not supported in a terminal",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {"id": 1, "windowId": 1, "title": "Inbox", "url": "https://mail.example.com/", "active": true},
        {"id": 2, "windowId": 1, "title": "GitHub", "url": "https://github.com/"},
        {"id": 3, "windowId": 2}
    ]"#;

    #[test]
    fn reads_snapshot_and_active_flag() {
        let mut platform = SnapshotPlatform::from_reader(SNAPSHOT.as_bytes()).unwrap();
        assert_eq!(platform.tabs().len(), 3);

        let active = platform.query_tabs(TabQuery::active_in_current_window()).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, TabId(1));
    }

    #[test]
    fn activation_is_remembered() {
        let mut platform = SnapshotPlatform::from_reader(SNAPSHOT.as_bytes()).unwrap();
        platform.activate_tab(TabId(3)).unwrap();
        assert_eq!(platform.activated().map(|tab| tab.id), Some(TabId(3)));
        assert!(platform.focus_window(WindowId(2)).is_ok());
        assert!(platform.focus_window(WindowId(9)).is_err());
    }

    #[test]
    fn unknown_tab_fails() {
        let mut platform = SnapshotPlatform::new(Vec::new(), None);
        let err = platform.activate_tab(TabId(4)).unwrap_err();
        assert_eq!(err.to_string(), "No tab with id: 4.");
    }
}
