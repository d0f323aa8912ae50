//! Cooperative debounce timer
//!
//! The event loop drives the timer by calling [`Debouncer::poll`] with the
//! current instant. Every [`Debouncer::push`] replaces the pending value and
//! restarts the window, so a burst of updates settles exactly once, carrying
//! the last value, `delay` after the last update.

use std::time::{Duration, Instant};

/// Default settling delay for the search query
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounced value with at most one pending update
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer already settled on `initial`
    #[must_use]
    pub const fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    /// Record a new value observed at `now`, cancelling any pending one
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Settle the pending value if its window has elapsed
    ///
    /// Returns the newly settled value once per settled burst, `None` otherwise.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, deadline)| now >= *deadline);
        if !due {
            return None;
        }
        let (value, _) = self.pending.take()?;
        self.settled = value;
        Some(&self.settled)
    }

    /// Last settled value
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.settled
    }

    /// Whether an update is waiting for its window to elapse
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending update settles
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}
