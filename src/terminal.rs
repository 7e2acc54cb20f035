// Chunk: docs/chunks/terminal_host - Terminal popup host
//!
//! Terminal plumbing: raw mode, focus and timers, key translation.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, KeyCode, KeyEvent as TermKeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEventKind as TermMouseKind,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

use tabfzf_input::{Key, KeyEvent, Modifiers, MouseEventKind};
use tabfzf_switcher::{FocusDeferral, FocusHost, TimerId};

/// Puts the terminal into raw mode on an alternate screen until dropped.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            EnableBracketedPaste,
            Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let mut stderr = io::stderr();
        let _ = execute!(
            stderr,
            Show,
            DisableBracketedPaste,
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
    }
}

#[derive(Debug, Clone, Copy)]
struct RetryTimer {
    id: TimerId,
    interval: Duration,
    due: Instant,
}

/// A focus host driven by the terminal event loop.
///
/// The query line holds focus whenever the terminal window does. Deferred
/// reassertions and the retry timer are queued here and delivered by the
/// loop, which uses [`poll_timeout`](Self::poll_timeout) to wake up in time.
#[derive(Debug)]
pub struct TerminalFocusHost {
    window_focused: bool,
    field_focused: bool,
    deferred: VecDeque<FocusDeferral>,
    timer: Option<RetryTimer>,
    next_timer: u64,
}

impl Default for TerminalFocusHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalFocusHost {
    pub fn new() -> Self {
        Self {
            window_focused: true,
            field_focused: false,
            deferred: VecDeque::new(),
            timer: None,
            next_timer: 0,
        }
    }

    /// Records a focus change reported by the terminal.
    pub fn set_window_focused(&mut self, focused: bool) {
        self.window_focused = focused;
        if !focused {
            self.field_focused = false;
        }
    }

    /// Removes one queued reassertion of the given kind.
    pub fn take_deferred(&mut self, when: FocusDeferral) -> bool {
        match self.deferred.iter().position(|queued| *queued == when) {
            Some(index) => {
                self.deferred.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the live timer if it is due at `now`, rescheduling it.
    pub fn due_timer(&mut self, now: Instant) -> Option<TimerId> {
        let timer = self.timer.as_mut().filter(|timer| timer.due <= now)?;
        timer.due = now + timer.interval;
        Some(timer.id)
    }

    /// How long the loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        if !self.deferred.is_empty() {
            return Duration::ZERO;
        }
        match self.timer {
            Some(timer) => timer.due.saturating_duration_since(now).min(idle),
            None => idle,
        }
    }
}

impl FocusHost for TerminalFocusHost {
    fn focus_query_field(&mut self) {
        self.field_focused = self.window_focused;
    }

    fn query_field_has_focus(&self) -> bool {
        self.window_focused && self.field_focused
    }

    fn defer_focus(&mut self, when: FocusDeferral) {
        self.deferred.push_back(when);
    }

    fn start_retry_timer(&mut self, interval: Duration) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.timer = Some(RetryTimer {
            id,
            interval,
            due: Instant::now() + interval,
        });
        id
    }

    fn cancel_retry_timer(&mut self, timer: TimerId) {
        if self.timer.is_some_and(|live| live.id == timer) {
            self.timer = None;
        }
    }
}

/// Translates a crossterm key event. Releases and unsupported keys yield `None`.
pub fn convert_key(event: &TermKeyEvent) -> Option<KeyEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let modifiers = Modifiers {
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
        meta: event
            .modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META),
        alt: event.modifiers.contains(KeyModifiers::ALT),
        control: event.modifiers.contains(KeyModifiers::CONTROL),
    };

    let key = match event.code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Enter => Key::Return,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };

    Some(KeyEvent::new(key, modifiers))
}

/// Translates the left-button part of a crossterm mouse event.
pub fn convert_mouse_kind(kind: TermMouseKind) -> Option<MouseEventKind> {
    match kind {
        TermMouseKind::Down(MouseButton::Left) => Some(MouseEventKind::Down),
        TermMouseKind::Up(MouseButton::Left) => Some(MouseEventKind::Up),
        TermMouseKind::Moved | TermMouseKind::Drag(MouseButton::Left) => Some(MouseEventKind::Moved),
        _ => None,
    }
}
