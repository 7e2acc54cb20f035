// Chunk: docs/chunks/tab_filter - Case-insensitive tab filtering
//! Text normalization for case-insensitive matching.

/// Lower-cases `text`; `None` is treated as the empty string.
///
/// Uses Unicode default case mapping, with no locale-specific rules.
pub fn normalize(text: Option<&str>) -> String {
    text.unwrap_or_default().to_lowercase()
}

/// Normalizes a raw query: lower-cased, then trimmed.
pub fn normalize_query(query: &str) -> String {
    normalize(Some(query)).trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_cases() {
        assert_eq!(normalize(Some("GitHub")), "github");
    }

    #[test]
    fn none_is_empty() {
        assert_eq!(normalize(None), "");
    }

    #[test]
    fn keeps_whitespace() {
        assert_eq!(normalize(Some("  A B ")), "  a b ");
    }

    #[test]
    fn query_is_trimmed_after_lowercasing() {
        assert_eq!(normalize_query("  FOO bar\t"), "foo bar");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn non_ascii_case_folding() {
        assert_eq!(normalize(Some("ÄÖÜ")), "äöü");
    }
}
