// Chunk: docs/chunks/query_buffer - Single-line query buffer with selection

//! Integration tests for realistic query editing sequences.
//!
//! These tests verify that the selection stays within bounds and that change
//! reporting distinguishes text edits from cursor moves.

use tabfzf_buffer::{QueryBuffer, QueryChange, Selection};

#[test]
fn test_type_word_then_delete_entirely() {
    let mut buf = QueryBuffer::new();

    for ch in "hello".chars() {
        buf.insert_str(&ch.to_string());
    }
    assert_eq!(buf.content(), "hello");
    assert_eq!(buf.selection(), Selection::collapsed(5));

    for _ in 0..5 {
        assert_eq!(buf.delete_backward(), QueryChange::TextChanged);
    }
    assert!(buf.is_empty());
    assert_eq!(buf.delete_backward(), QueryChange::None);
}

#[test]
fn test_word_motion_then_kill() {
    let mut buf = QueryBuffer::from_str("alpha beta  gamma");
    buf.collapse_to(0);

    let target = buf.word_forward_target();
    buf.collapse_to(target);
    assert_eq!(buf.selection(), Selection::collapsed(5));

    let target = buf.word_forward_target();
    buf.collapse_to(target);
    assert_eq!(buf.selection(), Selection::collapsed(10));

    let target = buf.word_backward_target();
    buf.collapse_to(target);
    assert_eq!(buf.selection(), Selection::collapsed(6));

    buf.kill_to_end();
    assert_eq!(buf.content(), "alpha ");
}

#[test]
fn test_select_all_then_type_replaces_everything() {
    let mut buf = QueryBuffer::from_str("github");
    buf.select_all();
    assert_eq!(buf.selection(), Selection { start: 0, end: 6 });

    buf.insert_str("g");
    assert_eq!(buf.content(), "g");
    assert_eq!(buf.selection(), Selection::collapsed(1));
}

#[test]
fn test_paste_with_newlines_stays_single_line() {
    let mut buf = QueryBuffer::new();
    buf.insert_str("foo\nbar");
    assert_eq!(buf.content(), "foobar");
    assert_eq!(buf.selection(), Selection::collapsed(6));
}

#[test]
fn test_delete_range_reorders_bounds() {
    let mut buf = QueryBuffer::from_str("abcdef");
    buf.delete_range(4, 1);
    assert_eq!(buf.content(), "aef");
    assert_eq!(buf.selection(), Selection::collapsed(1));
}

#[test]
fn test_selection_never_exceeds_text_after_edits() {
    let mut buf = QueryBuffer::from_str("some query text");
    buf.set_selection(3, 15);
    buf.delete_selection();
    assert!(buf.selection().end <= buf.len());
    buf.kill_to_end();
    buf.move_right();
    assert!(buf.selection().end <= buf.len());
    assert_eq!(buf.content(), "som");
}
