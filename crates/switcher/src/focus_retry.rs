// Chunk: docs/chunks/focus_retry - Focus reassertion against window-manager races
//!
//! Bounded focus-retry loop.
//!
//! A loop is a repeating timer. Each tick counts an attempt and reasserts focus
//! if the field lost it; the timer is cancelled once the field holds focus or
//! the attempt budget is spent. At most one loop is live.

use std::time::Duration;

use tracing::debug;

use crate::focus::{FocusHost, TimerId};

/// Default interval between retry ticks.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(30);

/// Default attempt budget per loop.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 15;

/// What a timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryTick {
    /// The tick belongs to a timer that is no longer live.
    Stale,
    /// The loop keeps running.
    Continue,
    /// The loop finished and its timer was cancelled.
    Finished,
}

#[derive(Debug, Clone, Copy)]
struct LiveLoop {
    timer: TimerId,
    attempts: u32,
}

/// Owns the single focus-retry timer.
#[derive(Debug, Clone)]
pub struct FocusRetry {
    interval: Duration,
    max_attempts: u32,
    live: Option<LiveLoop>,
}

impl Default for FocusRetry {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_INTERVAL, DEFAULT_MAX_ATTEMPTS)
    }
}

impl FocusRetry {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            live: None,
        }
    }

    /// Returns true if a retry timer is live.
    pub fn is_active(&self) -> bool {
        self.live.is_some()
    }

    /// Attempts counted by the live loop, if any.
    pub fn attempts(&self) -> Option<u32> {
        self.live.map(|live| live.attempts)
    }

    /// Starts a new loop, cancelling any live one.
    ///
    /// The caller performs the reassertions that go with it.
    pub fn start<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        self.cancel(host);
        let timer = host.start_retry_timer(self.interval);
        debug!(?timer, interval_ms = self.interval.as_millis() as u64, "focus retry started");
        self.live = Some(LiveLoop { timer, attempts: 0 });
    }

    /// Cancels the live loop, if any.
    pub fn cancel<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(live) = self.live.take() {
            host.cancel_retry_timer(live.timer);
        }
    }

    /// Handles a tick of `timer`.
    ///
    /// `reassert` runs when the query field does not hold focus. Afterwards the
    /// loop finishes if the field holds focus or the budget is spent.
    pub fn tick<H, F>(&mut self, timer: TimerId, host: &mut H, reassert: F) -> RetryTick
    where
        H: FocusHost + ?Sized,
        F: FnOnce(&mut H),
    {
        let Some(live) = self.live.as_mut().filter(|live| live.timer == timer) else {
            return RetryTick::Stale;
        };

        live.attempts += 1;
        let attempts = live.attempts;

        if !host.query_field_has_focus() {
            reassert(host);
        }

        if attempts >= self.max_attempts || host.query_field_has_focus() {
            debug!(attempts, focused = host.query_field_has_focus(), "focus retry finished");
            self.cancel(host);
            return RetryTick::Finished;
        }

        RetryTick::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingFocusHost;

    #[test]
    fn start_schedules_one_timer() {
        let mut host = RecordingFocusHost::new();
        let mut retry = FocusRetry::default();
        retry.start(&mut host);

        assert!(host.deferrals.is_empty());
        assert_eq!(host.live_timers.len(), 1);
        assert_eq!(host.intervals, vec![Duration::from_millis(30)]);
        assert!(retry.is_active());
    }

    #[test]
    fn restart_cancels_previous_timer() {
        let mut host = RecordingFocusHost::new();
        let mut retry = FocusRetry::default();
        retry.start(&mut host);
        let first = host.live_timers[0];
        retry.start(&mut host);

        assert_eq!(host.cancelled, vec![first]);
        assert_eq!(host.live_timers.len(), 1);
        assert_ne!(host.live_timers[0], first);
    }

    #[test]
    fn finishes_once_focus_is_held() {
        let mut host = RecordingFocusHost::new();
        host.focus_sticks = true;
        let mut retry = FocusRetry::default();
        retry.start(&mut host);
        let timer = host.live_timers[0];

        let mut reasserted = 0;
        let tick = retry.tick(timer, &mut host, |h| {
            reasserted += 1;
            h.focus_query_field();
        });

        assert_eq!(tick, RetryTick::Finished);
        assert_eq!(reasserted, 1);
        assert!(host.live_timers.is_empty());
        assert!(!retry.is_active());
    }

    #[test]
    fn gives_up_after_budget() {
        let mut host = RecordingFocusHost::new();
        let mut retry = FocusRetry::new(Duration::from_millis(30), 15);
        retry.start(&mut host);
        let timer = host.live_timers[0];

        for attempt in 1..15 {
            assert_eq!(retry.tick(timer, &mut host, |h| h.focus_query_field()), RetryTick::Continue);
            assert_eq!(retry.attempts(), Some(attempt));
        }
        assert_eq!(retry.tick(timer, &mut host, |h| h.focus_query_field()), RetryTick::Finished);
        assert_eq!(host.focus_calls, 15);
        assert!(host.live_timers.is_empty());
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut host = RecordingFocusHost::new();
        let mut retry = FocusRetry::default();
        retry.start(&mut host);
        let stale = host.live_timers[0];
        retry.start(&mut host);

        assert_eq!(retry.tick(stale, &mut host, |_| panic!("must not reassert")), RetryTick::Stale);
        assert_eq!(retry.attempts(), Some(0));
    }

    #[test]
    fn focused_field_is_not_reasserted() {
        let mut host = RecordingFocusHost::new();
        host.has_focus = true;
        let mut retry = FocusRetry::default();
        retry.start(&mut host);
        let timer = host.live_timers[0];

        assert_eq!(retry.tick(timer, &mut host, |_| panic!("already focused")), RetryTick::Finished);
    }
}
