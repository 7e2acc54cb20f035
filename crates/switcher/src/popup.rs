// Chunk: docs/chunks/key_dispatcher - Popup session and input state machine
//!
//! The popup session.
//!
//! [`Popup`] holds every piece of session state: the tab snapshot, the query,
//! the filtered list with its selection, the current view and the focus-retry
//! loop. The host feeds it [`PopupEvent`]s through [`Popup::handle_event`] and
//! reads the rendered state back through the accessors.
//!
//! Key events are routed in two steps. [`resolve_action`] maps `(view, key)`
//! to a [`PopupAction`] without touching any state, then the popup executes
//! the action.
//!
//! Committing a selection is two-phase. The popup emits
//! [`PopupOutcome::Activate`] and refuses further commits until the host
//! reports the activation result through [`Popup::finish_activation`] (or lets
//! [`Popup::activate_pending`] run the gateway synchronously). After handling,
//! check [`Popup::take_outcome`] to see what the host has to do.

use tracing::{debug, info, warn};

use tabfzf_buffer::{QueryBuffer, Selection};

use crate::config::SwitcherConfig;
use crate::error::{ActivationError, InitializationError, PlatformError};
use crate::filter::{filter_tabs, MatchFields};
use crate::focus::{FocusDeferral, FocusHost, Handled, TimerId};
use crate::focus_retry::FocusRetry;
use crate::gateway::{self, TabPlatform, TabQuery};
use crate::input::{Key, KeyEvent, MouseEvent};
use crate::line_editor::{
    apply_chord, apply_native_edit, resolve_chord, resolve_native_edit, LineCommand, LineEdit,
    NativeEdit,
};
use crate::selector::{SelectorOutcome, TabRow, TabSelector};
use crate::status::Status;
use crate::tab::{Tab, TabId};
use crate::view::{View, ViewRouter};

/// Input delivered to the popup by its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEvent {
    /// A key press while the popup has focus.
    Key(KeyEvent),
    /// Committed text from paste or an input method, inserted over the selection.
    Text(String),
    /// A click on a row of the tab list.
    RowClicked(usize),
    /// A raw pointer event on the tab list.
    Mouse(MouseEvent),
    /// The popup's window gained focus.
    WindowFocused,
    /// The popup's document became visible or hidden.
    VisibilityChanged { visible: bool },
    /// A reassertion scheduled through `FocusHost::defer_focus` is due.
    DeferredFocus,
    /// The focus-retry timer fired.
    FocusRetryTick(TimerId),
    /// The settings button was pressed.
    OpenSettings,
    /// The back button of the settings or help view was pressed.
    BackToMain,
}

/// What the host has to do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupOutcome {
    /// Activate this tab, then report back via `finish_activation`.
    Activate(Tab),
    /// Close the popup.
    Close,
}

/// An action resolved from a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupAction {
    /// A readline chord on the query.
    Line(LineCommand),
    /// Move the selection by the given delta, wrapping.
    MoveSelection(isize),
    /// Activate the selected tab.
    Commit,
    /// Close the popup.
    Close,
    /// Toggle the help view.
    ToggleHelp,
    /// An edit the text field performs on its own.
    Native(NativeEdit),
}

/// Maps a key event to an action for the given view.
///
/// In the main view the order is: readline chords, ArrowDown / Alt+N,
/// ArrowUp / Alt+P, Enter, Escape, then native text editing. In every view
/// Ctrl+H toggles help.
pub fn resolve_action(view: View, event: &KeyEvent) -> Option<PopupAction> {
    let chord = resolve_chord(event);
    if chord == Some(LineCommand::ToggleHelp) {
        return Some(PopupAction::ToggleHelp);
    }
    if view != View::Main {
        return None;
    }
    if let Some(command) = chord {
        return Some(PopupAction::Line(command));
    }

    match event.key {
        Key::Down => return Some(PopupAction::MoveSelection(1)),
        Key::Up => return Some(PopupAction::MoveSelection(-1)),
        Key::Return => return Some(PopupAction::Commit),
        Key::Escape => return Some(PopupAction::Close),
        _ => {}
    }

    if event.modifiers.is_alt() {
        match event.lower_char() {
            Some('n') => return Some(PopupAction::MoveSelection(1)),
            Some('p') => return Some(PopupAction::MoveSelection(-1)),
            _ => {}
        }
    }

    resolve_native_edit(event).map(PopupAction::Native)
}

/// Focuses the query field and selects its whole text.
fn reassert_focus<H: FocusHost + ?Sized>(host: &mut H, query: &mut QueryBuffer) {
    host.focus_query_field();
    query.select_all();
}

/// Reasserts focus now, again on the next paint and after a zero-delay timer.
fn focus_query_field<H: FocusHost + ?Sized>(host: &mut H, query: &mut QueryBuffer) {
    reassert_focus(host, query);
    host.defer_focus(FocusDeferral::NextPaint);
    host.defer_focus(FocusDeferral::ZeroDelay);
}

/// One popup session.
#[derive(Debug, Clone)]
pub struct Popup {
    /// Snapshot taken at startup, in platform order.
    tabs: Vec<Tab>,
    /// The tab that was active when the popup opened.
    excluded: Option<TabId>,
    match_fields: MatchFields,
    query: QueryBuffer,
    selector: TabSelector,
    router: ViewRouter,
    status: Status,
    focus_retry: FocusRetry,
    /// False when initialization failed; every event is then unhandled.
    interactive: bool,
    activation_in_flight: bool,
    closed: bool,
    pending_outcome: Option<PopupOutcome>,
}

impl Popup {
    /// Creates an interactive popup over a tab snapshot.
    ///
    /// Focus retries are not started; see [`Popup::open`].
    pub fn new(tabs: Vec<Tab>, active: Option<TabId>, config: &SwitcherConfig) -> Self {
        let mut popup = Self {
            tabs,
            excluded: active,
            match_fields: config.match_fields(),
            query: QueryBuffer::new(),
            selector: TabSelector::new(),
            router: ViewRouter::new(),
            status: Status::default(),
            focus_retry: config.focus_retry(),
            interactive: true,
            activation_in_flight: false,
            closed: false,
            pending_outcome: None,
        };
        popup.refresh();
        popup
    }

    /// Creates a non-interactive popup that only shows why it failed.
    pub fn failed(err: &InitializationError, config: &SwitcherConfig) -> Self {
        let mut popup = Self::new(Vec::new(), None, config);
        popup.interactive = false;
        popup.status = Status::error(err.to_string());
        popup
    }

    /// Reads the tab snapshot from `platform` and starts the focus loop.
    ///
    /// A failed read yields a non-interactive popup showing the error.
    pub fn open<P, H>(platform: &mut P, config: &SwitcherConfig, host: &mut H) -> Self
    where
        P: TabPlatform + ?Sized,
        H: FocusHost + ?Sized,
    {
        match gateway::snapshot(platform) {
            Ok((tabs, active)) => {
                debug!(tabs = tabs.len(), ?active, "popup opened");
                let mut popup = Self::new(tabs, active, config);
                popup.start_focus(host);
                popup
            }
            Err(err) => {
                warn!(error = %err, "popup initialization failed");
                Self::failed(&err, config)
            }
        }
    }

    // ==================== Accessors ====================

    pub fn query(&self) -> &QueryBuffer {
        &self.query
    }

    pub fn query_text(&self) -> String {
        self.query.content()
    }

    pub fn query_selection(&self) -> Selection {
        self.query.selection()
    }

    /// The filtered tabs, in platform order.
    pub fn visible_tabs(&self) -> &[Tab] {
        self.selector.items()
    }

    pub fn selected_index(&self) -> usize {
        self.selector.selected_index()
    }

    pub fn selected_tab(&self) -> Option<&Tab> {
        self.selector.selected()
    }

    /// Renderable rows of the filtered list.
    pub fn rows(&self) -> Vec<TabRow> {
        self.selector.rows()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn view(&self) -> View {
        self.router.current()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn activation_in_flight(&self) -> bool {
        self.activation_in_flight
    }

    pub fn focus_retry(&self) -> &FocusRetry {
        &self.focus_retry
    }

    /// Returns the pending outcome without consuming it.
    pub fn pending_outcome(&self) -> Option<&PopupOutcome> {
        self.pending_outcome.as_ref()
    }

    /// Takes the pending outcome, leaving `None`.
    pub fn take_outcome(&mut self) -> Option<PopupOutcome> {
        self.pending_outcome.take()
    }

    // ==================== Events ====================

    /// Handles one event.
    ///
    /// Returns `Handled::Yes` when a popup binding consumed the event and the
    /// host must suppress its default handling.
    pub fn handle_event<H: FocusHost + ?Sized>(&mut self, event: PopupEvent, host: &mut H) -> Handled {
        if !self.interactive || self.closed {
            return Handled::No;
        }

        match event {
            PopupEvent::Key(key) => self.handle_key(&key, host),
            PopupEvent::Text(text) => {
                if !self.router.is_main() {
                    return Handled::No;
                }
                if self.query.insert_str(&text).is_text_changed() {
                    self.on_query_changed();
                }
                // Native text input, like typed characters.
                Handled::No
            }
            PopupEvent::RowClicked(row) => {
                if !self.router.is_main() || self.activation_in_flight {
                    return Handled::No;
                }
                if self.selector.select_row(row) {
                    self.commit();
                    Handled::Yes
                } else {
                    Handled::No
                }
            }
            PopupEvent::Mouse(mouse) => {
                if !self.router.is_main() || self.activation_in_flight {
                    return Handled::No;
                }
                match self.selector.handle_mouse(mouse) {
                    SelectorOutcome::Confirmed(_) => self.commit(),
                    SelectorOutcome::Pending => {}
                }
                Handled::Yes
            }
            PopupEvent::WindowFocused | PopupEvent::VisibilityChanged { visible: true } => {
                if self.router.is_main() {
                    self.start_focus(host);
                }
                Handled::Yes
            }
            PopupEvent::VisibilityChanged { visible: false } => {
                self.focus_retry.cancel(host);
                Handled::Yes
            }
            PopupEvent::DeferredFocus => {
                if self.router.is_main() {
                    reassert_focus(host, &mut self.query);
                }
                Handled::Yes
            }
            PopupEvent::FocusRetryTick(timer) => {
                let query = &mut self.query;
                self.focus_retry
                    .tick(timer, host, |host| focus_query_field(host, query));
                Handled::Yes
            }
            PopupEvent::OpenSettings => {
                self.focus_retry.cancel(host);
                self.router.show_settings();
                Handled::Yes
            }
            PopupEvent::BackToMain => {
                self.show_main(host);
                Handled::Yes
            }
        }
    }

    fn handle_key<H: FocusHost + ?Sized>(&mut self, event: &KeyEvent, host: &mut H) -> Handled {
        let Some(action) = resolve_action(self.router.current(), event) else {
            return Handled::No;
        };

        match action {
            PopupAction::Line(command) => match apply_chord(command, &mut self.query) {
                LineEdit::TextChanged => self.on_query_changed(),
                LineEdit::ToggleHelp => self.toggle_help(host),
                LineEdit::CursorMoved | LineEdit::Unchanged => {}
            },
            PopupAction::MoveSelection(delta) => {
                self.selector.move_by(delta);
            }
            PopupAction::Commit => self.commit(),
            PopupAction::Close => self.close(),
            PopupAction::ToggleHelp => self.toggle_help(host),
            PopupAction::Native(edit) => {
                if apply_native_edit(&edit, &mut self.query).is_text_changed() {
                    self.on_query_changed();
                }
                // The field's own editing, not a popup binding.
                return Handled::No;
            }
        }
        Handled::Yes
    }

    // ==================== Activation ====================

    /// Reports the result of an activation requested via
    /// [`PopupOutcome::Activate`].
    ///
    /// Success closes the popup. Failure shows the error and leaves the query
    /// and selection as they were.
    pub fn finish_activation(&mut self, result: Result<(), ActivationError>) {
        self.activation_in_flight = false;
        match result {
            Ok(()) => self.close(),
            Err(err) => {
                warn!(error = %err, "tab activation failed");
                self.status = Status::error(format!("Failed to switch tab: {err}"));
            }
        }
    }

    /// Runs a pending activation against `platform` and finishes it.
    ///
    /// Returns `None` if no activation was pending.
    pub fn activate_pending<P: TabPlatform + ?Sized>(
        &mut self,
        platform: &mut P,
    ) -> Option<Result<(), ActivationError>> {
        let tab = match self.pending_outcome.take() {
            Some(PopupOutcome::Activate(tab)) => tab,
            other => {
                self.pending_outcome = other;
                return None;
            }
        };
        let result = gateway::activate(platform, &tab);
        self.finish_activation(result.clone());
        Some(result)
    }

    fn commit(&mut self) {
        if self.activation_in_flight {
            debug!("commit ignored, activation in flight");
            return;
        }
        let Some(tab) = self.selector.selected().cloned() else {
            return;
        };
        info!(tab = %tab.id, "committing selection");
        self.activation_in_flight = true;
        self.pending_outcome = Some(PopupOutcome::Activate(tab));
    }

    fn close(&mut self) {
        self.closed = true;
        self.pending_outcome = Some(PopupOutcome::Close);
    }

    // ==================== Views & focus ====================

    fn toggle_help<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        match self.router.toggle_help() {
            View::Main => self.start_focus(host),
            View::Settings | View::Help => self.focus_retry.cancel(host),
        }
    }

    fn show_main<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        self.router.show_main();
        self.start_focus(host);
    }

    fn start_focus<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        focus_query_field(host, &mut self.query);
        self.focus_retry.start(host);
    }

    // ==================== Filtering ====================

    /// Re-reads the tab list from `platform` and recomputes the filtered list.
    ///
    /// The tab excluded at open stays excluded. On failure the previous
    /// snapshot is kept and the error is shown in the status line.
    pub fn refresh_tabs<P: TabPlatform + ?Sized>(
        &mut self,
        platform: &mut P,
    ) -> Result<(), PlatformError> {
        match platform.query_tabs(TabQuery::all()) {
            Ok(tabs) => {
                debug!(tabs = tabs.len(), "tab snapshot refreshed");
                self.tabs = tabs;
                self.refresh();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to refresh tabs");
                self.status = Status::error(InitializationError::from(err.clone()).to_string());
                Err(err)
            }
        }
    }

    fn on_query_changed(&mut self) {
        self.selector.reset_selection();
        self.refresh();
    }

    fn refresh(&mut self) {
        let query = self.query.content();
        let items = filter_tabs(&self.tabs, self.excluded, &query, self.match_fields);
        debug!(query = %query, visible = items.len(), total = self.tabs.len(), "filtered tabs");
        self.status = Status::tab_count(items.len());
        self.selector.set_items(items);
    }
}
