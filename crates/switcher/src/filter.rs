// Chunk: docs/chunks/tab_filter - Case-insensitive tab filtering
//!
//! Tab filtering.
//!
//! The filter is a stable substring match: no scoring, no re-ranking. Tabs keep
//! the platform-reported order, minus the excluded (active) tab and minus tabs
//! whose title (and optionally host) does not contain the query.

use crate::normalize::{normalize, normalize_query};
use crate::tab::{Tab, TabId};

/// Which tab fields a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchFields {
    /// Display title only.
    Title,
    /// Display title or URL host.
    #[default]
    TitleAndHost,
}

/// Returns true if `tab` matches an already-normalized, non-empty query.
pub fn tab_matches(tab: &Tab, normalized_query: &str, fields: MatchFields) -> bool {
    if normalize(Some(tab.display_title())).contains(normalized_query) {
        return true;
    }
    match fields {
        MatchFields::Title => false,
        MatchFields::TitleAndHost => {
            let host = normalize(Some(&tab.host()));
            !host.is_empty() && host.contains(normalized_query)
        }
    }
}

/// Produces the ordered visible subset of `tabs`.
///
/// 1. The tab whose id equals `excluded` is removed.
/// 2. A query that is empty after lower-casing and trimming keeps every
///    remaining tab.
/// 3. Otherwise a tab is kept if it matches per [`tab_matches`].
pub fn filter_tabs(
    tabs: &[Tab],
    excluded: Option<TabId>,
    query: &str,
    fields: MatchFields,
) -> Vec<Tab> {
    let q = normalize_query(query);
    tabs.iter()
        .filter(|tab| Some(tab.id) != excluded)
        .filter(|tab| q.is_empty() || tab_matches(tab, &q, fields))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tabs: &[Tab]) -> Vec<i64> {
        tabs.iter().map(|tab| tab.id.0).collect()
    }

    fn sample() -> Vec<Tab> {
        vec![
            Tab::new(1, 1).with_title("GitHub").with_url("https://github.com/"),
            Tab::new(2, 1).with_title("Gitea"),
            Tab::new(3, 1).with_title(""),
        ]
    }

    #[test]
    fn excluded_tab_and_fallback_title() {
        let result = filter_tabs(&sample(), Some(TabId(1)), "git", MatchFields::TitleAndHost);
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn empty_query_only_excludes() {
        let result = filter_tabs(&sample(), Some(TabId(2)), "", MatchFields::TitleAndHost);
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn whitespace_query_is_empty() {
        let result = filter_tabs(&sample(), None, "   ", MatchFields::Title);
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn query_is_trimmed() {
        let result = filter_tabs(&sample(), None, "  gitea ", MatchFields::Title);
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn untitled_fallback_is_matchable() {
        let tabs = vec![Tab::new(1, 1).with_title("   "), Tab::new(2, 1)];
        let result = filter_tabs(&tabs, None, "untitled", MatchFields::Title);
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn host_matching_is_optional() {
        let tabs = vec![Tab::new(1, 1).with_title("Docs").with_url("https://docs.rs/tokio")];
        assert!(filter_tabs(&tabs, None, "docs.rs", MatchFields::Title).is_empty());
        assert_eq!(ids(&filter_tabs(&tabs, None, "docs.rs", MatchFields::TitleAndHost)), vec![1]);
    }

    #[test]
    fn no_url_never_matches_by_host() {
        let tabs = vec![Tab::new(1, 1).with_title("Notes").with_url("garbage")];
        assert!(filter_tabs(&tabs, None, "garbage", MatchFields::TitleAndHost).is_empty());
    }

    #[test]
    fn query_is_case_insensitive() {
        let upper = filter_tabs(&sample(), None, "GIT", MatchFields::TitleAndHost);
        let lower = filter_tabs(&sample(), None, "git", MatchFields::TitleAndHost);
        assert_eq!(upper, lower);
    }
}
