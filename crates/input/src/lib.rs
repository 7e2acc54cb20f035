// Chunk: docs/chunks/input_events - Shared input types crate
//!
//! Input event types for keyboard and pointer handling.
//!
//! These types abstract over the host's native key events (DOM keyboard events,
//! terminal key reports) and provide a clean Rust-native interface for input
//! handling. This crate is shared between the query buffer, the switcher engine
//! and the terminal host to avoid circular dependencies.

/// A keyboard event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed
    pub key: Key,
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Creates a new KeyEvent with the given key and modifiers.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Creates a KeyEvent for a single character with no modifiers.
    pub fn char(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            modifiers: Modifiers::default(),
        }
    }

    /// Creates a KeyEvent for a key with no modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Creates a Ctrl+`ch` chord.
    pub fn ctrl(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            modifiers: Modifiers {
                control: true,
                ..Default::default()
            },
        }
    }

    /// Creates an Alt+`ch` chord.
    pub fn alt(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            modifiers: Modifiers {
                alt: true,
                ..Default::default()
            },
        }
    }

    /// Returns the character for `Key::Char`, lower-cased.
    ///
    /// Chord matching compares letters case-insensitively, so Ctrl+A and
    /// Ctrl+Shift+A resolve to the same binding.
    pub fn lower_char(&self) -> Option<char> {
        match self.key {
            Key::Char(ch) => ch.to_lowercase().next(),
            _ => None,
        }
    }
}

/// Modifier keys that can be held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key
    pub shift: bool,
    /// Meta key (Cmd/⌘, Super, Windows)
    pub meta: bool,
    /// Alt key (Option/⌥)
    pub alt: bool,
    /// Control key (Ctrl/⌃)
    pub control: bool,
}

impl Modifiers {
    /// Control held without meta.
    ///
    /// This is the "Ctrl" of the readline-style bindings. Alt may also be held.
    pub fn is_ctrl(&self) -> bool {
        self.control && !self.meta
    }

    /// Alt held without control or meta.
    pub fn is_alt(&self) -> bool {
        self.alt && !self.control && !self.meta
    }
}

/// Keys that can be pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (already accounts for shift state)
    Char(char),
    /// Backspace / Delete backward
    Backspace,
    /// Forward delete
    Delete,
    /// Return / Enter
    Return,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Home key
    Home,
    /// End key
    End,
    /// Tab key
    Tab,
    /// Escape key
    Escape,
}

/// A pointer event on the tab list.
///
/// Hosts translate native coordinates into a row index before delivering the
/// event, so the engine never needs geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of pointer event
    pub kind: MouseEventKind,
    /// Row of the tab list under the pointer
    pub row: usize,
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
}

/// Kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// Button pressed
    Down,
    /// Button released
    Up,
    /// Pointer moved
    Moved,
}
