// Chunk: docs/chunks/shortcut_settings - Popup keyboard shortcut
//! The keyboard shortcut that opens the popup.

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, SettingsError};

/// Name of the command whose shortcut opens the popup.
pub const COMMAND_NAME: &str = "_execute_browser_action";

/// Page where the browser lets users edit extension shortcuts.
pub const SHORTCUT_SETTINGS_URL: &str = "about:addons";

/// A registered command and its shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default)]
    pub shortcut: Option<String>,
}

/// The browser's command registry.
pub trait CommandRegistry {
    fn commands(&mut self) -> Result<Vec<Command>, PlatformError>;
    fn update_shortcut(&mut self, name: &str, shortcut: &str) -> Result<(), PlatformError>;
}

/// The popup command's shortcut, if one is set.
pub fn current_shortcut<R: CommandRegistry + ?Sized>(
    registry: &mut R,
) -> Result<Option<String>, PlatformError> {
    Ok(registry
        .commands()?
        .into_iter()
        .find(|command| command.name == COMMAND_NAME)
        .and_then(|command| command.shortcut)
        .filter(|shortcut| !shortcut.is_empty()))
}

/// Sets the popup command's shortcut to the trimmed `input`.
pub fn save_shortcut<R: CommandRegistry + ?Sized>(
    registry: &mut R,
    input: &str,
) -> Result<String, SettingsError> {
    let shortcut = input.trim();
    if shortcut.is_empty() {
        return Err(SettingsError::EmptyShortcut);
    }
    registry.update_shortcut(COMMAND_NAME, shortcut)?;
    Ok(shortcut.to_owned())
}
