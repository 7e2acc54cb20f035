// Chunk: docs/chunks/error_model - Switcher error types
//!
//! Error types for the switcher.
//!
//! No error is fatal to the popup: initialization and activation failures are
//! rendered as status text by [`Popup`](crate::popup::Popup). The enums exist
//! so the platform boundary and the settings panel can report what went wrong.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An error reported by the hosting platform.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The hosting context lacks the capability (e.g., no tab-listing API).
    #[error("{0} is unavailable in this context.")]
    Unavailable(&'static str),
    /// The platform rejected the call.
    #[error("{0}")]
    Message(String),
}

impl PlatformError {
    /// Creates a `Message` error from anything displayable.
    pub fn message(msg: impl Into<String>) -> Self {
        PlatformError::Message(msg.into())
    }
}

/// The tab snapshot could not be obtained.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to read tabs: {0}")]
pub struct InitializationError(#[from] pub PlatformError);

/// Committing a selection failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivationError {
    /// Marking the tab active failed.
    #[error("{0}")]
    ActivateTab(PlatformError),
    /// Focusing the tab's window failed.
    #[error("{0}")]
    FocusWindow(PlatformError),
}

/// Errors raised by the settings panel.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Enter a JSON object with theme keys.")]
    EmptyThemeJson,
    #[error("Theme JSON is invalid.")]
    InvalidThemeJson(#[source] serde_json::Error),
    #[error("Theme JSON must be an object.")]
    ThemeNotObject,
    #[error("No supported theme keys found in JSON.")]
    NoSupportedThemeKeys,
    #[error("Custom theme not found.")]
    ThemeNotFound,
    #[error("Enter a shortcut like Ctrl+Shift+Y.")]
    EmptyShortcut,
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file {path:?} is malformed")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialization_error_prefixes_message() {
        let err = InitializationError::from(PlatformError::Unavailable("Tabs API"));
        assert_eq!(
            err.to_string(),
            "Failed to read tabs: Tabs API is unavailable in this context."
        );
    }

    #[test]
    fn activation_error_shows_platform_message() {
        let err = ActivationError::FocusWindow(PlatformError::message("No window with id: 7."));
        assert_eq!(err.to_string(), "No window with id: 7.");
    }
}
