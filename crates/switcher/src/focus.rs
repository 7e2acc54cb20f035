// Chunk: docs/chunks/focus_retry - Focus reassertion against window-manager races
//!
//! Focus plumbing between the popup and its host.
//!
//! Some window managers steal focus right after the popup mounts, so the popup
//! keeps reasserting focus on the query field for a short while. The host side
//! of that (actually focusing a widget, running timers) sits behind
//! [`FocusHost`] so the retry logic can be driven by a mock in tests.

use std::time::Duration;

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The event was consumed; the host must suppress its default handling.
    Yes,
    /// The event was not handled (default handling applies).
    No,
}

impl Handled {
    pub fn is_handled(&self) -> bool {
        matches!(self, Handled::Yes)
    }
}

/// Identifies a retry timer started by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// When a deferred focus reassertion should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDeferral {
    /// Before the next paint.
    NextPaint,
    /// After a zero-delay timer.
    ZeroDelay,
}

/// Host services needed to keep the query field focused.
///
/// Deferred reassertions come back as `PopupEvent::DeferredFocus` and timer
/// ticks as `PopupEvent::FocusRetryTick`.
pub trait FocusHost {
    /// Moves keyboard focus to the query field.
    fn focus_query_field(&mut self);

    /// Returns true if the query field currently holds focus.
    fn query_field_has_focus(&self) -> bool;

    /// Schedules a `DeferredFocus` event.
    fn defer_focus(&mut self, when: FocusDeferral);

    /// Starts a repeating timer delivering `FocusRetryTick` every `interval`.
    fn start_retry_timer(&mut self, interval: Duration) -> TimerId;

    /// Stops a timer started by [`start_retry_timer`](Self::start_retry_timer).
    fn cancel_retry_timer(&mut self, timer: TimerId);
}
