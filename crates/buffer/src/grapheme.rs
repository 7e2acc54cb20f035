// Chunk: docs/chunks/grapheme_cluster_awareness - Grapheme cluster boundary helpers

//! Grapheme cluster boundary detection over char slices.
//!
//! The query stores Rust `char`s, but single-character deletion (Ctrl+D,
//! Backspace, Delete) removes what the user perceives as one character: a
//! combining sequence such as `e` + U+0301, a ZWJ emoji family, or a regional
//! indicator pair.

use unicode_segmentation::UnicodeSegmentation;

/// Char offsets at which grapheme clusters start, followed by `chars.len()`.
fn grapheme_starts(chars: &[char]) -> Vec<usize> {
    let s: String = chars.iter().collect();
    let mut starts = Vec::with_capacity(chars.len() + 1);
    let mut offset = 0;
    for grapheme in s.graphemes(true) {
        starts.push(offset);
        offset += grapheme.chars().count();
    }
    starts.push(offset);
    starts
}

/// Returns the char offset of the grapheme boundary at or before `char_offset - 1`.
///
/// Returns 0 when `char_offset` is 0.
pub fn grapheme_boundary_left(chars: &[char], char_offset: usize) -> usize {
    let char_offset = char_offset.min(chars.len());
    if char_offset == 0 {
        return 0;
    }

    // ASCII chars are single-char graphemes.
    if chars[char_offset - 1].is_ascii() {
        return char_offset - 1;
    }

    grapheme_starts(chars)
        .into_iter()
        .take_while(|&start| start < char_offset)
        .last()
        .unwrap_or(0)
}

/// Returns the char offset of the end of the grapheme containing `char_offset`.
///
/// Returns `chars.len()` when `char_offset` is at or past the end.
pub fn grapheme_boundary_right(chars: &[char], char_offset: usize) -> usize {
    if char_offset >= chars.len() {
        return chars.len();
    }

    // An ASCII char followed by another ASCII char (or nothing) cannot be
    // extended by a combining mark.
    if chars[char_offset].is_ascii()
        && chars.get(char_offset + 1).map_or(true, |next| next.is_ascii())
    {
        return char_offset + 1;
    }

    grapheme_starts(chars)
        .into_iter()
        .find(|&start| start > char_offset)
        .unwrap_or(chars.len())
}

/// Number of chars in the grapheme cluster starting at `char_offset`.
///
/// Returns 0 at the end of the text.
pub fn grapheme_len_at(chars: &[char], char_offset: usize) -> usize {
    grapheme_boundary_right(chars, char_offset).saturating_sub(char_offset)
}

/// Number of chars in the grapheme cluster ending at `char_offset`.
pub fn grapheme_len_before(chars: &[char], char_offset: usize) -> usize {
    let char_offset = char_offset.min(chars.len());
    char_offset - grapheme_boundary_left(chars, char_offset)
}
