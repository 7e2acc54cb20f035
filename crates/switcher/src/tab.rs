// Chunk: docs/chunks/tab_model - Read-only tab snapshot
//!
//! The tab snapshot the switcher filters.
//!
//! Tabs are owned by the platform. The switcher holds a read-only copy taken
//! when the popup opens; the JSON shape matches what browser tab APIs report
//! (`id`, `windowId`, `title`, `url`, `favIconUrl`).

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Display text for a tab with no usable title.
pub const UNTITLED: &str = "(untitled)";

/// Display text for a tab whose URL has no host.
pub const LOCAL_DOMAIN: &str = "(local)";

/// Opaque tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i64);

/// Opaque window identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A browser tab as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub window_id: WindowId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
}

impl Tab {
    /// Creates a tab with only the ids set.
    pub fn new(id: i64, window_id: i64) -> Self {
        Self {
            id: TabId(id),
            window_id: WindowId(window_id),
            title: None,
            url: None,
            fav_icon_url: None,
        }
    }

    /// Builder-style title setter.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder-style URL setter.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// The trimmed title, or [`UNTITLED`] when absent or blank.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => UNTITLED,
        }
    }

    /// Host name of the tab's URL; empty when missing or unparseable.
    pub fn host(&self) -> String {
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .and_then(|url| Url::parse(url).ok())
            .and_then(|url| url.host_str().map(str::to_owned))
            .unwrap_or_default()
    }

    /// Host for display, or [`LOCAL_DOMAIN`] when there is none.
    pub fn display_domain(&self) -> String {
        let host = self.host();
        if host.is_empty() {
            LOCAL_DOMAIN.to_owned()
        } else {
            host
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_trims() {
        let tab = Tab::new(1, 1).with_title("  Inbox  ");
        assert_eq!(tab.display_title(), "Inbox");
    }

    #[test]
    fn blank_title_falls_back() {
        assert_eq!(Tab::new(1, 1).display_title(), UNTITLED);
        assert_eq!(Tab::new(1, 1).with_title("").display_title(), UNTITLED);
        assert_eq!(Tab::new(1, 1).with_title("   ").display_title(), UNTITLED);
    }

    #[test]
    fn host_is_lowercase_hostname() {
        let tab = Tab::new(1, 1).with_url("https://Docs.RS/serde/latest");
        assert_eq!(tab.host(), "docs.rs");
    }

    #[test]
    fn unparseable_url_has_empty_host() {
        assert_eq!(Tab::new(1, 1).with_url("not a url").host(), "");
        assert_eq!(Tab::new(1, 1).with_url("about:blank").host(), "");
        assert_eq!(Tab::new(1, 1).host(), "");
    }

    #[test]
    fn display_domain_falls_back_to_local() {
        assert_eq!(Tab::new(1, 1).with_url("file:///tmp/a.html").display_domain(), LOCAL_DOMAIN);
        assert_eq!(
            Tab::new(1, 1).with_url("https://example.org/").display_domain(),
            "example.org"
        );
    }

    #[test]
    fn deserializes_platform_shape() {
        let json = r#"{"id": 4, "windowId": 2, "title": "Rust", "url": "https://rust-lang.org/", "favIconUrl": "https://rust-lang.org/favicon.ico", "pinned": false}"#;
        let tab: Tab = serde_json::from_str(json).unwrap();
        assert_eq!(tab.id, TabId(4));
        assert_eq!(tab.window_id, WindowId(2));
        assert_eq!(tab.title.as_deref(), Some("Rust"));
        assert!(tab.fav_icon_url.is_some());
    }

    #[test]
    fn missing_optional_fields_are_none() {
        let tab: Tab = serde_json::from_str(r#"{"id": 1, "windowId": 1}"#).unwrap();
        assert_eq!(tab.title, None);
        assert_eq!(tab.url, None);
    }
}
