// Chunk: docs/chunks/settings_panel - Themes and shortcut settings view
//!
//! The settings view: theme management and the popup shortcut.
//!
//! [`SettingsPanel`] owns the theme book, the shortcut input and the settings
//! status line. Each action reports its result as status text; nothing here
//! fails loudly.

pub mod shortcut;
pub mod store;
pub mod theme;

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::error::SettingsError;
use crate::gateway::TabPlatform;
use crate::status::Status;

use shortcut::{CommandRegistry, SHORTCUT_SETTINGS_URL};
use store::KeyValueStore;
use theme::{Theme, ThemeBook};

/// Milliseconds since the Unix epoch, used to mint custom theme ids.
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis())
}

/// State of the settings view.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    themes: ThemeBook,
    shortcut_input: String,
    status: Status,
}

impl SettingsPanel {
    pub fn new(themes: ThemeBook) -> Self {
        Self {
            themes,
            ..Self::default()
        }
    }

    pub fn themes(&self) -> &ThemeBook {
        &self.themes
    }

    pub fn active_theme(&self) -> &Theme {
        self.themes.active()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn shortcut_input(&self) -> &str {
        &self.shortcut_input
    }

    pub fn set_shortcut_input(&mut self, input: impl Into<String>) {
        self.shortcut_input = input.into();
    }

    /// Called when the settings view is shown: clears the status and loads the
    /// current shortcut.
    pub fn open<R: CommandRegistry + ?Sized>(&mut self, registry: &mut R) {
        self.status = Status::default();
        self.load_shortcut(registry);
    }

    // ==================== Shortcut ====================

    pub fn load_shortcut<R: CommandRegistry + ?Sized>(&mut self, registry: &mut R) {
        match shortcut::current_shortcut(registry) {
            Ok(Some(current)) => {
                self.shortcut_input = current;
                self.status = Status::info("Current shortcut loaded.");
            }
            Ok(None) => {
                self.shortcut_input.clear();
                self.status = Status::info(
                    "No shortcut set. Save one or open the browser's shortcut settings.",
                );
            }
            Err(err) => {
                warn!(error = %err, "failed to load shortcut");
                self.status = Status::error(format!("Failed to load shortcut: {err}"));
            }
        }
    }

    pub fn save_shortcut<R: CommandRegistry + ?Sized>(&mut self, registry: &mut R) {
        self.status = match shortcut::save_shortcut(registry, &self.shortcut_input) {
            Ok(_) => Status::info("Shortcut saved."),
            Err(SettingsError::Platform(err)) => {
                warn!(error = %err, "failed to save shortcut");
                Status::error(format!(
                    "Cannot set shortcut here: {err}. Use the browser's shortcut settings."
                ))
            }
            Err(err) => Status::error(err.to_string()),
        };
    }

    /// Opens the browser's shortcut page in a new tab.
    pub fn open_shortcut_settings<P: TabPlatform + ?Sized>(&mut self, platform: &mut P) {
        if let Err(err) = platform.create_tab(SHORTCUT_SETTINGS_URL) {
            warn!(error = %err, "failed to open shortcut settings");
            self.status = Status::error(format!("Failed to open shortcut settings: {err}"));
        }
    }

    // ==================== Themes ====================

    pub fn apply_theme<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, id: &str) {
        self.themes.set_active(store, id);
        self.status = Status::info("Theme applied.");
    }

    pub fn add_theme<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        name: &str,
        json: &str,
        now_millis: u128,
    ) {
        self.status = match self.themes.add_custom(store, name, json, now_millis) {
            Ok(theme) => Status::info(format!("Added and applied theme: {}", theme.name)),
            Err(err) => Status::error(err.to_string()),
        };
    }

    pub fn delete_theme<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, id: &str) {
        self.status = match self.themes.delete_custom(store, id) {
            Ok(theme) => Status::info(format!("Deleted theme: {}", theme.name)),
            Err(err) => Status::error(err.to_string()),
        };
    }
}
