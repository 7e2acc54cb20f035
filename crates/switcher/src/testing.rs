// Chunk: docs/chunks/test_doubles - In-memory platform and focus host
//!
//! In-memory implementations of the host traits.
//!
//! These back the unit and integration tests and let the popup run without a
//! browser. Every call is recorded so tests can assert on exactly what the
//! popup asked the host to do.

use std::time::Duration;

use crate::error::PlatformError;
use crate::focus::{FocusDeferral, FocusHost, TimerId};
use crate::gateway::{TabPlatform, TabQuery};
use crate::settings::shortcut::{Command, CommandRegistry};
use crate::tab::{Tab, TabId, WindowId};

/// A call made against [`MockPlatform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    QueryTabs(TabQuery),
    ActivateTab(TabId),
    FocusWindow(WindowId),
    CreateTab(String),
}

/// A tab platform backed by a vector of tabs.
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    pub tabs: Vec<Tab>,
    pub active: Option<TabId>,
    pub calls: Vec<PlatformCall>,
    query_error: Option<PlatformError>,
    activate_error: Option<PlatformError>,
    focus_error: Option<PlatformError>,
    create_error: Option<PlatformError>,
}

impl MockPlatform {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self {
            tabs,
            ..Self::default()
        }
    }

    pub fn with_active(mut self, tab: TabId) -> Self {
        self.active = Some(tab);
        self
    }

    /// Makes every `query_tabs` call fail with `err`.
    pub fn fail_query(mut self, err: PlatformError) -> Self {
        self.query_error = Some(err);
        self
    }

    /// Makes every `activate_tab` call fail with `err`.
    pub fn fail_activate(mut self, err: PlatformError) -> Self {
        self.activate_error = Some(err);
        self
    }

    /// Makes every `focus_window` call fail with `err`.
    pub fn fail_focus(mut self, err: PlatformError) -> Self {
        self.focus_error = Some(err);
        self
    }

    /// Makes every `create_tab` call fail with `err`.
    pub fn fail_create(mut self, err: PlatformError) -> Self {
        self.create_error = Some(err);
        self
    }

    /// Number of activation attempts recorded.
    pub fn activation_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, PlatformCall::ActivateTab(_)))
            .count()
    }
}

impl TabPlatform for MockPlatform {
    fn query_tabs(&mut self, query: TabQuery) -> Result<Vec<Tab>, PlatformError> {
        self.calls.push(PlatformCall::QueryTabs(query));
        if let Some(err) = &self.query_error {
            return Err(err.clone());
        }
        let tabs = match query.active {
            Some(true) => self
                .tabs
                .iter()
                .filter(|tab| Some(tab.id) == self.active)
                .cloned()
                .collect(),
            Some(false) => self
                .tabs
                .iter()
                .filter(|tab| Some(tab.id) != self.active)
                .cloned()
                .collect(),
            None => self.tabs.clone(),
        };
        Ok(tabs)
    }

    fn activate_tab(&mut self, tab: TabId) -> Result<Tab, PlatformError> {
        self.calls.push(PlatformCall::ActivateTab(tab));
        if let Some(err) = &self.activate_error {
            return Err(err.clone());
        }
        let found = self
            .tabs
            .iter()
            .find(|candidate| candidate.id == tab)
            .cloned()
            .ok_or_else(|| PlatformError::message(format!("No tab with id: {tab}.")))?;
        self.active = Some(tab);
        Ok(found)
    }

    fn focus_window(&mut self, window: WindowId) -> Result<(), PlatformError> {
        self.calls.push(PlatformCall::FocusWindow(window));
        match &self.focus_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn create_tab(&mut self, url: &str) -> Result<Tab, PlatformError> {
        self.calls.push(PlatformCall::CreateTab(url.to_owned()));
        if let Some(err) = &self.create_error {
            return Err(err.clone());
        }
        let id = self.tabs.iter().map(|tab| tab.id.0).max().unwrap_or(0) + 1;
        let window = self
            .tabs
            .iter()
            .find(|tab| Some(tab.id) == self.active)
            .map_or(1, |tab| tab.window_id.0);
        let tab = Tab::new(id, window).with_url(url);
        self.tabs.push(tab.clone());
        Ok(tab)
    }
}

/// A focus host that records every request.
///
/// By default focusing the field does not stick, which models a window
/// manager that keeps stealing focus. Set `focus_sticks` to let it stick.
#[derive(Debug, Clone, Default)]
pub struct RecordingFocusHost {
    pub has_focus: bool,
    pub focus_sticks: bool,
    pub focus_calls: usize,
    pub deferrals: Vec<FocusDeferral>,
    pub intervals: Vec<Duration>,
    pub live_timers: Vec<TimerId>,
    pub cancelled: Vec<TimerId>,
    next_timer: u64,
}

impl RecordingFocusHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single live timer, if exactly one exists.
    pub fn live_timer(&self) -> Option<TimerId> {
        match self.live_timers.as_slice() {
            [timer] => Some(*timer),
            _ => None,
        }
    }
}

impl FocusHost for RecordingFocusHost {
    fn focus_query_field(&mut self) {
        self.focus_calls += 1;
        if self.focus_sticks {
            self.has_focus = true;
        }
    }

    fn query_field_has_focus(&self) -> bool {
        self.has_focus
    }

    fn defer_focus(&mut self, when: FocusDeferral) {
        self.deferrals.push(when);
    }

    fn start_retry_timer(&mut self, interval: Duration) -> TimerId {
        self.next_timer += 1;
        let timer = TimerId(self.next_timer);
        self.intervals.push(interval);
        self.live_timers.push(timer);
        timer
    }

    fn cancel_retry_timer(&mut self, timer: TimerId) {
        self.live_timers.retain(|live| *live != timer);
        self.cancelled.push(timer);
    }
}

/// A command registry backed by a vector of commands.
#[derive(Debug, Clone, Default)]
pub struct MockCommandRegistry {
    pub commands: Vec<Command>,
    /// Shortcuts passed to `update_shortcut`, in order.
    pub updates: Vec<(String, String)>,
    list_error: Option<PlatformError>,
    update_error: Option<PlatformError>,
}

impl MockCommandRegistry {
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands,
            ..Self::default()
        }
    }

    pub fn fail_list(mut self, err: PlatformError) -> Self {
        self.list_error = Some(err);
        self
    }

    pub fn fail_update(mut self, err: PlatformError) -> Self {
        self.update_error = Some(err);
        self
    }
}

impl CommandRegistry for MockCommandRegistry {
    fn commands(&mut self) -> Result<Vec<Command>, PlatformError> {
        match &self.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.commands.clone()),
        }
    }

    fn update_shortcut(&mut self, name: &str, shortcut: &str) -> Result<(), PlatformError> {
        if let Some(err) = &self.update_error {
            return Err(err.clone());
        }
        self.updates.push((name.to_owned(), shortcut.to_owned()));
        match self.commands.iter_mut().find(|command| command.name == name) {
            Some(command) => command.shortcut = Some(shortcut.to_owned()),
            None => self.commands.push(Command {
                name: name.to_owned(),
                shortcut: Some(shortcut.to_owned()),
            }),
        }
        Ok(())
    }
}
