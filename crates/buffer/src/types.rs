// Chunk: docs/chunks/query_buffer - Single-line query buffer with selection

/// A selection within the query, as char offsets in document order.
///
/// `start <= end` always holds. A collapsed selection (`start == end`) is a
/// plain cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Creates a selection, swapping the bounds if given in reverse order.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A collapsed selection (cursor) at `pos`.
    pub fn collapsed(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Returns true if the selection covers no characters.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the selection covers no characters.
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }
}

/// What a buffer operation changed.
///
/// Callers use this to decide whether the query text changed (and the tab
/// list must be re-filtered) or only the cursor moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryChange {
    /// Nothing changed (e.g., deletion at the end of the text).
    None,
    /// Only the cursor or selection moved.
    CursorMoved,
    /// The text changed.
    TextChanged,
}

impl QueryChange {
    /// Returns true if the text changed.
    pub fn is_text_changed(&self) -> bool {
        matches!(self, QueryChange::TextChanged)
    }

    /// Returns true if nothing changed.
    pub fn is_none(&self) -> bool {
        matches!(self, QueryChange::None)
    }
}
