// Chunk: docs/chunks/switcher_config - Switcher configuration file
//!
//! Switcher configuration.
//!
//! The configuration file is optional. It is read from
//! `<config_dir>/tabfzf/config.json` and every field has a default, so a
//! partial file is fine:
//!
//! ```json
//! { "focus_retry_max_attempts": 30, "match_host": false }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::filter::MatchFields;
use crate::focus_retry::{FocusRetry, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL};

/// Application name used for the config and data directories.
pub const APP_NAME: &str = "tabfzf";

/// Config file name.
const CONFIG_FILENAME: &str = "config.json";

/// Tunables for the popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitcherConfig {
    /// Milliseconds between focus-retry ticks.
    pub focus_retry_interval_ms: u64,
    /// Ticks per focus-retry loop.
    pub focus_retry_max_attempts: u32,
    /// Whether the query also matches the URL host.
    pub match_host: bool,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            focus_retry_interval_ms: DEFAULT_RETRY_INTERVAL.as_millis() as u64,
            focus_retry_max_attempts: DEFAULT_MAX_ATTEMPTS,
            match_host: true,
        }
    }
}

impl SwitcherConfig {
    /// Loads the config from the default location.
    ///
    /// Falls back to defaults when no config directory exists or the file is
    /// missing.
    pub fn load() -> Result<Self, ConfigError> {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads the config from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn match_fields(&self) -> MatchFields {
        if self.match_host {
            MatchFields::TitleAndHost
        } else {
            MatchFields::Title
        }
    }

    pub fn focus_retry(&self) -> FocusRetry {
        FocusRetry::new(
            Duration::from_millis(self.focus_retry_interval_ms),
            self.focus_retry_max_attempts,
        )
    }
}

/// Returns the path of the config file, if a config directory exists.
pub fn config_file_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_NAME).join(CONFIG_FILENAME))
}

/// Returns the tabfzf data directory, if one exists.
pub fn data_dir() -> Option<PathBuf> {
    Some(dirs::data_dir()?.join(APP_NAME))
}
