// Chunk: docs/chunks/word_motion - Readline word boundaries

//! Readline-style word boundaries.
//!
//! A word is a maximal run of non-whitespace chars. Whitespace is
//! `char::is_whitespace`.

/// Position reached by moving forward one word from `pos`.
///
/// Skips whitespace, then non-whitespace. May return `chars.len()`.
pub fn forward_word_end(chars: &[char], pos: usize) -> usize {
    let mut index = pos.min(chars.len());
    while index < chars.len() && chars[index].is_whitespace() {
        index += 1;
    }
    while index < chars.len() && !chars[index].is_whitespace() {
        index += 1;
    }
    index
}

/// Position reached by moving backward one word from `pos`.
///
/// Skips whitespace leftward, then non-whitespace leftward. Floors at 0.
pub fn backward_word_start(chars: &[char], pos: usize) -> usize {
    let mut index = pos.min(chars.len());
    while index > 0 && chars[index - 1].is_whitespace() {
        index -= 1;
    }
    while index > 0 && !chars[index - 1].is_whitespace() {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn forward_from_start_stops_after_first_word() {
        let text = chars("alpha beta  gamma");
        assert_eq!(forward_word_end(&text, 0), 5);
        assert_eq!(forward_word_end(&text, 5), 10);
        assert_eq!(forward_word_end(&text, 10), 17);
    }

    #[test]
    fn backward_mirrors_forward() {
        let text = chars("alpha beta  gamma");
        assert_eq!(backward_word_start(&text, 10), 6);
        assert_eq!(backward_word_start(&text, 12), 6);
        assert_eq!(backward_word_start(&text, 6), 0);
    }

    #[test]
    fn motion_is_bounded() {
        let text = chars("  ");
        assert_eq!(forward_word_end(&text, 0), 2);
        assert_eq!(backward_word_start(&text, 2), 0);
        assert_eq!(forward_word_end(&text, 99), 2);
        assert_eq!(backward_word_start(&[], 0), 0);
    }

    #[test]
    fn tabs_and_unicode_spaces_are_whitespace() {
        let text = chars("a\tb\u{00A0}c");
        assert_eq!(forward_word_end(&text, 1), 3);
        assert_eq!(backward_word_start(&text, 5), 4);
    }
}
