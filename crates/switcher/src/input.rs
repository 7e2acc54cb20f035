// Chunk: docs/chunks/input_events - Key and mouse event types

// Re-export all input types from the shared tabfzf-input crate so that
// crate::input::KeyEvent etc. resolve inside the switcher.
pub use tabfzf_input::*;
