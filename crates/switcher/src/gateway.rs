// Chunk: docs/chunks/activation_gateway - Tab platform boundary
//!
//! The boundary to the hosting browser (or a stand-in for it).
//!
//! [`TabPlatform`] is the only way the switcher touches tabs and windows. The
//! popup reads one snapshot at startup through [`snapshot`] and commits a
//! selection through [`activate`].

use tracing::{info, warn};

use crate::error::{ActivationError, InitializationError, PlatformError};
use crate::tab::{Tab, TabId, WindowId};

/// Filter passed to [`TabPlatform::query_tabs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabQuery {
    /// Only tabs whose active flag equals this value.
    pub active: Option<bool>,
    /// Only tabs in the window the popup belongs to.
    pub current_window: bool,
}

impl TabQuery {
    /// Every tab in every window.
    pub fn all() -> Self {
        Self::default()
    }

    /// The active tab of the popup's window.
    pub fn active_in_current_window() -> Self {
        Self {
            active: Some(true),
            current_window: true,
        }
    }
}

/// Tab and window operations provided by the host.
pub trait TabPlatform {
    /// Lists tabs matching `query`, in the platform's order.
    fn query_tabs(&mut self, query: TabQuery) -> Result<Vec<Tab>, PlatformError>;

    /// Marks `tab` active within its window.
    fn activate_tab(&mut self, tab: TabId) -> Result<Tab, PlatformError>;

    /// Brings `window` to the foreground.
    fn focus_window(&mut self, window: WindowId) -> Result<(), PlatformError>;

    /// Opens a new tab at `url`.
    fn create_tab(&mut self, url: &str) -> Result<Tab, PlatformError>;
}

/// Reads every tab and the id of the currently active one.
///
/// The active tab is `None` when the current window has no active tab.
pub fn snapshot<P: TabPlatform + ?Sized>(
    platform: &mut P,
) -> Result<(Vec<Tab>, Option<TabId>), InitializationError> {
    let tabs = platform.query_tabs(TabQuery::all()).map_err(|err| {
        warn!(error = %err, "failed to list tabs");
        err
    })?;
    let active = platform
        .query_tabs(TabQuery::active_in_current_window())
        .map_err(|err| {
            warn!(error = %err, "failed to read active tab");
            err
        })?
        .first()
        .map(|tab| tab.id);
    Ok((tabs, active))
}

/// Makes `tab` the active tab and focuses its window.
///
/// Both steps must succeed; the first failure is returned.
pub fn activate<P: TabPlatform + ?Sized>(platform: &mut P, tab: &Tab) -> Result<(), ActivationError> {
    info!(tab = %tab.id, window = %tab.window_id, "activating tab");
    platform
        .activate_tab(tab.id)
        .map_err(ActivationError::ActivateTab)?;
    platform
        .focus_window(tab.window_id)
        .map_err(ActivationError::FocusWindow)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockPlatform, PlatformCall};
    use pretty_assertions::assert_eq;

    fn platform() -> MockPlatform {
        MockPlatform::new(vec![
            Tab::new(1, 10).with_title("one"),
            Tab::new(2, 20).with_title("two"),
        ])
        .with_active(TabId(1))
    }

    #[test]
    fn snapshot_reads_all_and_active() {
        let mut platform = platform();
        let (tabs, active) = snapshot(&mut platform).unwrap();
        assert_eq!(tabs.len(), 2);
        assert_eq!(active, Some(TabId(1)));
    }

    #[test]
    fn snapshot_without_active_tab() {
        let mut platform = MockPlatform::new(vec![Tab::new(1, 10)]);
        let (_, active) = snapshot(&mut platform).unwrap();
        assert_eq!(active, None);
    }

    #[test]
    fn snapshot_failure_is_initialization_error() {
        let mut platform = platform().fail_query(PlatformError::Unavailable("Tabs API"));
        let err = snapshot(&mut platform).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to read tabs: Tabs API is unavailable in this context."
        );
    }

    #[test]
    fn activate_marks_tab_then_focuses_window() {
        let mut platform = platform();
        let tab = Tab::new(2, 20);
        activate(&mut platform, &tab).unwrap();
        assert_eq!(
            platform.calls,
            vec![
                PlatformCall::ActivateTab(TabId(2)),
                PlatformCall::FocusWindow(WindowId(20)),
            ]
        );
        assert_eq!(platform.active, Some(TabId(2)));
    }

    #[test]
    fn activate_stops_at_first_failure() {
        let mut platform = platform().fail_activate(PlatformError::message("No tab with id: 2."));
        let err = activate(&mut platform, &Tab::new(2, 20)).unwrap_err();
        assert_eq!(err.to_string(), "No tab with id: 2.");
        assert_eq!(platform.calls, vec![PlatformCall::ActivateTab(TabId(2))]);
    }

    #[test]
    fn focus_failure_is_reported() {
        let mut platform = platform().fail_focus(PlatformError::message("No window with id: 20."));
        let err = activate(&mut platform, &Tab::new(2, 20)).unwrap_err();
        assert!(matches!(err, ActivationError::FocusWindow(_)));
    }
}
