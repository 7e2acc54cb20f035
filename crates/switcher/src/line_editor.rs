// Chunk: docs/chunks/line_editor - Readline chords for the query field
//!
//! Line editor: readline-style chords over the query buffer.
//!
//! Chord resolution is a stateless pure function, `(modifiers, key) →
//! Option<LineCommand>`. All chords are single-step modifier+key combinations,
//! so no chord state machine is needed. Chords are checked in a fixed priority
//! order and a matched chord is always consumed.
//!
//! Keys that are not chords fall through to native text editing
//! ([`resolve_native_edit`]), which models what the browser's text field does
//! on its own: typing, Backspace, Delete, arrows, Home/End.

use tabfzf_buffer::{QueryBuffer, QueryChange};

use crate::input::{Key, KeyEvent};

/// Readline chords recognized in the query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCommand {
    /// Ctrl+A
    MoveToStart,
    /// Ctrl+E
    MoveToEnd,
    /// Alt+F
    WordForward,
    /// Alt+B
    WordBackward,
    /// Alt+D
    DeleteWordForward,
    /// Ctrl+D
    DeleteCharForward,
    /// Ctrl+K
    KillToEnd,
    /// Ctrl+H
    ToggleHelp,
}

/// Result of executing a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEdit {
    /// Only the cursor moved.
    CursorMoved,
    /// The query text was rewritten; the tab list must be re-filtered.
    TextChanged,
    /// The chord was consumed but changed nothing (Ctrl+D at end of text).
    Unchanged,
    /// The help view should be toggled.
    ToggleHelp,
}

/// Resolves a key event to a readline chord.
///
/// Priority order: Ctrl+A, Ctrl+E, Alt+F, Alt+B, Alt+D, Ctrl+D, Ctrl+K, Ctrl+H.
pub fn resolve_chord(event: &KeyEvent) -> Option<LineCommand> {
    let mods = &event.modifiers;
    let ctrl = mods.is_ctrl();
    let alt = mods.is_alt();

    match event.lower_char()? {
        'a' if ctrl => Some(LineCommand::MoveToStart),
        'e' if ctrl => Some(LineCommand::MoveToEnd),
        'f' if alt => Some(LineCommand::WordForward),
        'b' if alt => Some(LineCommand::WordBackward),
        'd' if alt => Some(LineCommand::DeleteWordForward),
        'd' if ctrl => Some(LineCommand::DeleteCharForward),
        'k' if ctrl => Some(LineCommand::KillToEnd),
        'h' if ctrl => Some(LineCommand::ToggleHelp),
        _ => None,
    }
}

/// Executes a chord against the buffer.
pub fn apply_chord(command: LineCommand, buffer: &mut QueryBuffer) -> LineEdit {
    let selection = buffer.selection();

    match command {
        LineCommand::MoveToStart => {
            buffer.collapse_to(0);
            LineEdit::CursorMoved
        }
        LineCommand::MoveToEnd => {
            buffer.collapse_to(buffer.len());
            LineEdit::CursorMoved
        }
        LineCommand::WordForward => {
            buffer.collapse_to(buffer.word_forward_target());
            LineEdit::CursorMoved
        }
        LineCommand::WordBackward => {
            buffer.collapse_to(buffer.word_backward_target());
            LineEdit::CursorMoved
        }
        LineCommand::DeleteWordForward => {
            if buffer.has_selection() {
                buffer.delete_selection();
            } else {
                let end = tabfzf_buffer::forward_word_end(buffer.chars(), selection.start);
                buffer.delete_range(selection.start, end);
            }
            // Counts as a rewrite even when nothing followed the cursor.
            LineEdit::TextChanged
        }
        LineCommand::DeleteCharForward => match buffer.delete_forward() {
            QueryChange::TextChanged => LineEdit::TextChanged,
            _ => LineEdit::Unchanged,
        },
        LineCommand::KillToEnd => {
            buffer.kill_to_end();
            LineEdit::TextChanged
        }
        LineCommand::ToggleHelp => LineEdit::ToggleHelp,
    }
}

/// Edits the text field performs natively when no chord matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeEdit {
    Insert(char),
    DeleteBackward,
    DeleteWordBackward,
    DeleteForward,
    MoveLeft,
    MoveRight,
    MoveToStart,
    MoveToEnd,
}

/// Resolves a key event to a native text-field edit.
pub fn resolve_native_edit(event: &KeyEvent) -> Option<NativeEdit> {
    let mods = &event.modifiers;

    match &event.key {
        // Printable characters (no Ctrl/Meta/Alt modifier)
        Key::Char(ch) if !mods.control && !mods.meta && !mods.alt && !ch.is_control() => {
            Some(NativeEdit::Insert(*ch))
        }

        // Alt+Backspace / Ctrl+Backspace → delete word backward
        Key::Backspace if mods.alt || mods.control => Some(NativeEdit::DeleteWordBackward),
        Key::Backspace => Some(NativeEdit::DeleteBackward),

        Key::Delete => Some(NativeEdit::DeleteForward),

        Key::Left if !mods.meta => Some(NativeEdit::MoveLeft),
        Key::Right if !mods.meta => Some(NativeEdit::MoveRight),

        // Meta+Left or Home → start of line
        Key::Left | Key::Home => Some(NativeEdit::MoveToStart),

        // Meta+Right or End → end of line
        Key::Right | Key::End => Some(NativeEdit::MoveToEnd),

        _ => None,
    }
}

/// Applies a native edit to the buffer.
pub fn apply_native_edit(edit: &NativeEdit, buffer: &mut QueryBuffer) -> QueryChange {
    match edit {
        NativeEdit::Insert(ch) => {
            let mut encoded = [0u8; 4];
            buffer.insert_str(ch.encode_utf8(&mut encoded))
        }
        NativeEdit::DeleteBackward => buffer.delete_backward(),
        NativeEdit::DeleteWordBackward => buffer.delete_word_backward(),
        NativeEdit::DeleteForward => buffer.delete_forward(),
        NativeEdit::MoveLeft => buffer.move_left(),
        NativeEdit::MoveRight => buffer.move_right(),
        NativeEdit::MoveToStart => buffer.collapse_to(0),
        NativeEdit::MoveToEnd => buffer.collapse_to(buffer.len()),
    }
}
