// Chunk: docs/chunks/selection_tracker - Bounded, wrapping tab selection
//!
//! The selection tracker over the filtered tab list.
//!
//! [`TabSelector`] holds the filtered view (`items`) and the highlighted
//! index. The index is clamped whenever the items change and wraps around
//! when moved, so it always addresses a tab when the list is non-empty.
//!
//! The selector knows nothing about queries or platforms; the popup
//! recomputes the items and hands them over via [`TabSelector::set_items`].

use crate::input::{MouseEvent, MouseEventKind};
use crate::tab::Tab;

/// Clamps `index` to `0..len`, or 0 when `len == 0`.
pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Moves `index` by `delta`, wrapping around a list of `len` items.
///
/// Returns `None` when `len == 0`.
pub fn wrap_index(index: usize, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    Some((index as isize + delta).rem_euclid(len) as usize)
}

/// The outcome of a pointer event on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorOutcome {
    /// Nothing to commit yet.
    Pending,
    /// The user clicked a row; the value is its index.
    Confirmed(usize),
}

/// A renderable row of the filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRow {
    /// URL host, or `(local)`.
    pub domain: String,
    /// Display title, or `(untitled)`.
    pub title: String,
    pub fav_icon_url: Option<String>,
    pub selected: bool,
}

/// The filtered tab list plus the highlighted index.
#[derive(Debug, Clone, Default)]
pub struct TabSelector {
    items: Vec<Tab>,
    /// Always valid for `items`, or 0 if empty.
    selected_index: usize,
}

impl TabSelector {
    /// Creates an empty selector with index 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the filtered tabs.
    pub fn items(&self) -> &[Tab] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the highlighted index (0 when empty).
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Returns the highlighted tab, if any.
    pub fn selected(&self) -> Option<&Tab> {
        self.items.get(self.selected_index)
    }

    /// Replaces the items and clamps the index to the new bounds.
    pub fn set_items(&mut self, items: Vec<Tab>) {
        self.items = items;
        self.selected_index = clamp_index(self.selected_index, self.items.len());
    }

    /// Resets the index to the top match.
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    /// Moves the selection by `delta`, wrapping around.
    ///
    /// Returns false (and does nothing) when the list is empty.
    pub fn move_by(&mut self, delta: isize) -> bool {
        match wrap_index(self.selected_index, delta, self.items.len()) {
            Some(index) => {
                self.selected_index = index;
                true
            }
            None => false,
        }
    }

    /// Selects `row` if it exists.
    pub fn select_row(&mut self, row: usize) -> bool {
        if row >= self.items.len() {
            return false;
        }
        self.selected_index = row;
        true
    }

    /// Handles a pointer event on the list.
    ///
    /// - **Down on a row**: selects it.
    /// - **Up on the selected row**: confirms it.
    /// - **Up on another row**: selects it without confirming.
    /// - **Outside the list / Moved**: no-op.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> SelectorOutcome {
        if event.row >= self.items.len() {
            return SelectorOutcome::Pending;
        }

        match event.kind {
            MouseEventKind::Down => {
                self.selected_index = event.row;
                SelectorOutcome::Pending
            }
            MouseEventKind::Up if event.row == self.selected_index => {
                SelectorOutcome::Confirmed(event.row)
            }
            MouseEventKind::Up => {
                self.selected_index = event.row;
                SelectorOutcome::Pending
            }
            MouseEventKind::Moved => SelectorOutcome::Pending,
        }
    }

    /// Builds renderable rows for the current items.
    pub fn rows(&self) -> Vec<TabRow> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, tab)| TabRow {
                domain: tab.display_domain(),
                title: tab.display_title().to_owned(),
                fav_icon_url: tab.fav_icon_url.clone(),
                selected: index == self.selected_index,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn tabs(n: i64) -> Vec<Tab> {
        (1..=n).map(|id| Tab::new(id, 1).with_title(format!("tab {id}"))).collect()
    }

    fn click(kind: MouseEventKind, row: usize) -> MouseEvent {
        MouseEvent {
            kind,
            row,
            modifiers: Modifiers::default(),
        }
    }

    // =========================================================================
    // Clamping
    // =========================================================================

    #[test]
    fn clamp_caps_to_last_item() {
        assert_eq!(clamp_index(7, 3), 2);
        assert_eq!(clamp_index(1, 3), 1);
        assert_eq!(clamp_index(4, 0), 0);
    }

    #[test]
    fn set_items_clamps_index_when_fewer_items() {
        let mut selector = TabSelector::new();
        selector.set_items(tabs(5));
        selector.move_by(4);
        assert_eq!(selector.selected_index(), 4);

        selector.set_items(tabs(3));
        assert_eq!(selector.selected_index(), 2);
    }

    #[test]
    fn set_items_keeps_index_when_list_grows() {
        let mut selector = TabSelector::new();
        selector.set_items(tabs(3));
        selector.move_by(1);
        selector.set_items(tabs(6));
        assert_eq!(selector.selected_index(), 1);
    }

    #[test]
    fn set_items_clamps_to_zero_when_empty() {
        let mut selector = TabSelector::new();
        selector.set_items(tabs(3));
        selector.move_by(2);
        selector.set_items(Vec::new());
        assert_eq!(selector.selected_index(), 0);
        assert!(selector.selected().is_none());
    }

    // =========================================================================
    // Wrapping movement
    // =========================================================================

    #[test]
    fn down_from_last_wraps_to_first() {
        let mut selector = TabSelector::new();
        selector.set_items(tabs(3));
        selector.move_by(2);
        assert!(selector.move_by(1));
        assert_eq!(selector.selected_index(), 0);
    }

    #[test]
    fn up_from_first_wraps_to_last() {
        let mut selector = TabSelector::new();
        selector.set_items(tabs(3));
        assert!(selector.move_by(-1));
        assert_eq!(selector.selected_index(), 2);
    }

    #[test]
    fn move_on_empty_is_noop() {
        let mut selector = TabSelector::new();
        assert!(!selector.move_by(1));
        assert_eq!(selector.selected_index(), 0);
    }

    #[test]
    fn n_moves_return_to_start() {
        for n in 1..8 {
            let mut selector = TabSelector::new();
            selector.set_items(tabs(n));
            let start = (n as usize) / 2;
            selector.select_row(start);
            for _ in 0..n {
                selector.move_by(1);
                assert!(selector.selected_index() < n as usize);
            }
            assert_eq!(selector.selected_index(), start);
        }
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    #[test]
    fn mouse_down_then_up_confirms() {
        let mut selector = TabSelector::new();
        selector.set_items(tabs(3));
        assert_eq!(selector.handle_mouse(click(MouseEventKind::Down, 2)), SelectorOutcome::Pending);
        assert_eq!(selector.selected_index(), 2);
        assert_eq!(
            selector.handle_mouse(click(MouseEventKind::Up, 2)),
            SelectorOutcome::Confirmed(2)
        );
    }

    #[test]
    fn mouse_up_on_other_row_only_selects() {
        let mut selector = TabSelector::new();
        selector.set_items(tabs(3));
        assert_eq!(selector.handle_mouse(click(MouseEventKind::Up, 1)), SelectorOutcome::Pending);
        assert_eq!(selector.selected_index(), 1);
    }

    #[test]
    fn mouse_outside_list_is_noop() {
        let mut selector = TabSelector::new();
        selector.set_items(tabs(2));
        assert_eq!(selector.handle_mouse(click(MouseEventKind::Down, 5)), SelectorOutcome::Pending);
        assert_eq!(selector.selected_index(), 0);
    }

    #[test]
    fn rows_mark_selection() {
        let mut selector = TabSelector::new();
        selector.set_items(vec![
            Tab::new(1, 1).with_title("One").with_url("https://one.example/"),
            Tab::new(2, 1),
        ]);
        selector.move_by(1);
        let rows = selector.rows();
        assert_eq!(rows[0].domain, "one.example");
        assert!(!rows[0].selected);
        assert_eq!(rows[1].title, "(untitled)");
        assert_eq!(rows[1].domain, "(local)");
        assert!(rows[1].selected);
    }
}
