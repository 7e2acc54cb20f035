// Chunk: docs/chunks/view_router - Main, settings and help views
//! Which of the popup's three views is showing.

/// A popup view. Exactly one is shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Query field plus tab list.
    #[default]
    Main,
    /// Themes and shortcut.
    Settings,
    /// Key binding reference.
    Help,
}

/// Tracks the current view.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewRouter {
    current: View,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn is_main(&self) -> bool {
        self.current == View::Main
    }

    pub fn show_main(&mut self) {
        self.current = View::Main;
    }

    pub fn show_settings(&mut self) {
        self.current = View::Settings;
    }

    /// Shows Help, or Main if Help is already showing. Returns the new view.
    pub fn toggle_help(&mut self) -> View {
        self.current = match self.current {
            View::Help => View::Main,
            View::Main | View::Settings => View::Help,
        };
        self.current
    }
}
