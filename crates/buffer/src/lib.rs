// Chunk: docs/chunks/query_buffer - Single-line query buffer with selection

//! tabfzf-buffer: the text model behind the tab switcher's search field.
//!
//! This crate provides a single-line buffer with a browser-style selection
//! (`start..end` in char offsets), readline word boundaries and grapheme-aware
//! single-character deletion.
//!
//! # Example
//!
//! ```
//! use tabfzf_buffer::{QueryBuffer, QueryChange, Selection};
//!
//! let mut buffer = QueryBuffer::from_str("alpha beta");
//! buffer.collapse_to(5);
//!
//! // Kill to end of line
//! assert_eq!(buffer.kill_to_end(), QueryChange::TextChanged);
//! assert_eq!(buffer.content(), "alpha");
//! assert_eq!(buffer.selection(), Selection::collapsed(5));
//! ```
//!
//! # Change Reporting
//!
//! Each operation returns a [`QueryChange`]:
//!
//! - `QueryChange::None` - No visible change (e.g., delete at the end of text)
//! - `QueryChange::CursorMoved` - Only the selection moved
//! - `QueryChange::TextChanged` - The text changed; dependent views must be recomputed

mod grapheme;
mod query_buffer;
mod types;
mod word;

pub use grapheme::{grapheme_boundary_left, grapheme_boundary_right, grapheme_len_at, grapheme_len_before};
pub use query_buffer::QueryBuffer;
pub use types::{QueryChange, Selection};
pub use word::{backward_word_start, forward_word_end};
