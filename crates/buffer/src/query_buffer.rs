// Chunk: docs/chunks/query_buffer - Single-line query buffer with selection

//! QueryBuffer is the single-line text model behind the search field.
//!
//! It owns the query text and a selection (`start..end` in char offsets), and
//! exposes the primitive edits that both the readline chords and native text
//! editing are built from. Every operation returns a [`QueryChange`] so the
//! caller can tell a text mutation (re-filter) from a cursor move.

use crate::grapheme::{grapheme_len_at, grapheme_len_before};
use crate::types::{QueryChange, Selection};
use crate::word::{backward_word_start, forward_word_end};

/// A single-line text buffer with a selection.
///
/// Invariants: the text contains no `\n` or `\r`, and
/// `selection.start <= selection.end <= len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuffer {
    chars: Vec<char>,
    selection: Selection,
}

impl QueryBuffer {
    /// Creates an empty buffer with the cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding `content` with the cursor collapsed at the end.
    ///
    /// Line breaks are dropped to keep the single-line invariant.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        let chars: Vec<char> = single_line(content).collect();
        let end = chars.len();
        Self {
            chars,
            selection: Selection::collapsed(end),
        }
    }

    // ==================== Accessors ====================

    /// Returns the text as a String.
    pub fn content(&self) -> String {
        self.chars.iter().collect()
    }

    /// Returns the text as a char slice.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of chars in the text.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns the current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Returns true if a non-empty selection exists.
    pub fn has_selection(&self) -> bool {
        !self.selection.is_collapsed()
    }

    // ==================== Cursor & Selection ====================

    /// Sets the selection, clamping both ends to the text and ordering them.
    pub fn set_selection(&mut self, a: usize, b: usize) -> QueryChange {
        let len = self.len();
        let next = Selection::new(a.min(len), b.min(len));
        self.replace_selection(next)
    }

    /// Collapses the selection to `pos` (clamped).
    pub fn collapse_to(&mut self, pos: usize) -> QueryChange {
        self.set_selection(pos, pos)
    }

    /// Selects the whole text.
    pub fn select_all(&mut self) -> QueryChange {
        self.set_selection(0, self.len())
    }

    /// Moves the cursor one grapheme left, or collapses a selection to its start.
    pub fn move_left(&mut self) -> QueryChange {
        if self.has_selection() {
            return self.collapse_to(self.selection.start);
        }
        let step = grapheme_len_before(&self.chars, self.selection.start);
        self.collapse_to(self.selection.start - step)
    }

    /// Moves the cursor one grapheme right, or collapses a selection to its end.
    pub fn move_right(&mut self) -> QueryChange {
        if self.has_selection() {
            return self.collapse_to(self.selection.end);
        }
        let step = grapheme_len_at(&self.chars, self.selection.end);
        self.collapse_to(self.selection.end + step)
    }

    /// Target of a forward word motion from the selection end.
    pub fn word_forward_target(&self) -> usize {
        forward_word_end(&self.chars, self.selection.end)
    }

    /// Target of a backward word motion from the selection start.
    pub fn word_backward_target(&self) -> usize {
        backward_word_start(&self.chars, self.selection.start)
    }

    // ==================== Mutations ====================

    /// Replaces `start..end` with `text` and collapses the cursor after it.
    ///
    /// Bounds are clamped and ordered. Line breaks in `text` are dropped.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) -> QueryChange {
        let range = Selection::new(start.min(self.len()), end.min(self.len()));
        let inserted: Vec<char> = single_line(text).collect();
        if range.is_empty() && inserted.is_empty() {
            return self.collapse_to(range.start);
        }

        let cursor = range.start + inserted.len();
        self.chars.splice(range.start..range.end, inserted);
        self.selection = Selection::collapsed(cursor);
        QueryChange::TextChanged
    }

    /// Deletes `start..end` and collapses the cursor at the deletion start.
    pub fn delete_range(&mut self, start: usize, end: usize) -> QueryChange {
        self.replace_range(start, end, "")
    }

    /// Inserts `text` over the selection (typing, paste, IME commit).
    pub fn insert_str(&mut self, text: &str) -> QueryChange {
        let Selection { start, end } = self.selection;
        self.replace_range(start, end, text)
    }

    /// Deletes the selection, leaving the cursor at its start.
    ///
    /// Returns `QueryChange::None` if the selection is collapsed.
    pub fn delete_selection(&mut self) -> QueryChange {
        if !self.has_selection() {
            return QueryChange::None;
        }
        let Selection { start, end } = self.selection;
        self.delete_range(start, end)
    }

    /// Deletes the grapheme after the cursor (or the selection).
    ///
    /// At the end of the text with no selection this is a no-op.
    pub fn delete_forward(&mut self) -> QueryChange {
        if self.has_selection() {
            return self.delete_selection();
        }
        let start = self.selection.start;
        let len = grapheme_len_at(&self.chars, start);
        if len == 0 {
            return QueryChange::None;
        }
        self.delete_range(start, start + len)
    }

    /// Deletes the grapheme before the cursor (or the selection).
    pub fn delete_backward(&mut self) -> QueryChange {
        if self.has_selection() {
            return self.delete_selection();
        }
        let end = self.selection.start;
        let len = grapheme_len_before(&self.chars, end);
        if len == 0 {
            return QueryChange::None;
        }
        self.delete_range(end - len, end)
    }

    /// Deletes from the previous word start to the cursor (Alt+Backspace).
    pub fn delete_word_backward(&mut self) -> QueryChange {
        if self.has_selection() {
            return self.delete_selection();
        }
        let end = self.selection.start;
        let start = backward_word_start(&self.chars, end);
        if start == end {
            return QueryChange::None;
        }
        self.delete_range(start, end)
    }

    /// Deletes from the selection start to the end of the text (kill-line).
    ///
    /// The cursor stays at the cut point. Returns `TextChanged` even when
    /// nothing follows the cursor, since the kill always rewrites the query.
    pub fn kill_to_end(&mut self) -> QueryChange {
        let start = self.selection.start;
        self.chars.truncate(start);
        self.selection = Selection::collapsed(start);
        QueryChange::TextChanged
    }

    fn replace_selection(&mut self, next: Selection) -> QueryChange {
        if next == self.selection {
            return QueryChange::None;
        }
        self.selection = next;
        QueryChange::CursorMoved
    }
}

fn single_line(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|ch| *ch != '\n' && *ch != '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let buf = QueryBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.selection(), Selection::collapsed(0));
    }

    #[test]
    fn test_from_str_puts_cursor_at_end() {
        let buf = QueryBuffer::from_str("hello");
        assert_eq!(buf.content(), "hello");
        assert_eq!(buf.selection(), Selection::collapsed(5));
    }

    #[test]
    fn test_from_str_drops_newlines() {
        let buf = QueryBuffer::from_str("a\nb\r\nc");
        assert_eq!(buf.content(), "abc");
    }

    #[test]
    fn test_set_selection_clamps_and_orders() {
        let mut buf = QueryBuffer::from_str("abc");
        buf.set_selection(10, 1);
        assert_eq!(buf.selection(), Selection { start: 1, end: 3 });
    }

    #[test]
    fn test_collapse_to_same_position_reports_none() {
        let mut buf = QueryBuffer::from_str("abc");
        assert_eq!(buf.collapse_to(3), QueryChange::None);
        assert_eq!(buf.collapse_to(0), QueryChange::CursorMoved);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut buf = QueryBuffer::from_str("hello world");
        buf.set_selection(0, 5);
        assert_eq!(buf.insert_str("howdy"), QueryChange::TextChanged);
        assert_eq!(buf.content(), "howdy world");
        assert_eq!(buf.selection(), Selection::collapsed(5));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = QueryBuffer::from_str("abc");
        assert_eq!(buf.delete_forward(), QueryChange::None);
        assert_eq!(buf.content(), "abc");
    }

    #[test]
    fn test_delete_forward_removes_one_char() {
        let mut buf = QueryBuffer::from_str("abc");
        buf.collapse_to(1);
        assert_eq!(buf.delete_forward(), QueryChange::TextChanged);
        assert_eq!(buf.content(), "ac");
        assert_eq!(buf.selection(), Selection::collapsed(1));
    }

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let mut buf = QueryBuffer::from_str("abc");
        buf.collapse_to(0);
        assert_eq!(buf.delete_backward(), QueryChange::None);
    }

    #[test]
    fn test_kill_to_end_truncates_at_selection_start() {
        let mut buf = QueryBuffer::from_str("alpha beta");
        buf.collapse_to(5);
        assert_eq!(buf.kill_to_end(), QueryChange::TextChanged);
        assert_eq!(buf.content(), "alpha");
        assert_eq!(buf.selection(), Selection::collapsed(5));
    }

    #[test]
    fn test_kill_to_end_with_selection_cuts_from_start() {
        let mut buf = QueryBuffer::from_str("alpha beta");
        buf.set_selection(2, 4);
        buf.kill_to_end();
        assert_eq!(buf.content(), "al");
    }

    #[test]
    fn test_delete_word_backward() {
        let mut buf = QueryBuffer::from_str("hello world");
        assert_eq!(buf.delete_word_backward(), QueryChange::TextChanged);
        assert_eq!(buf.content(), "hello ");
    }

    #[test]
    fn test_move_left_collapses_selection_to_start() {
        let mut buf = QueryBuffer::from_str("hello");
        buf.set_selection(1, 4);
        buf.move_left();
        assert_eq!(buf.selection(), Selection::collapsed(1));
    }

    #[test]
    fn test_move_right_at_end_reports_none() {
        let mut buf = QueryBuffer::from_str("hi");
        assert_eq!(buf.move_right(), QueryChange::None);
    }
}
