//! Sliding-window admission control for outbound API requests.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Sliding-window rate limiter
///
/// Remembers the instant of every admitted request inside the trailing
/// `window` and admits a new request only while fewer than `max_per_window`
/// of them remain. The limiter is safe to share across tasks and threads
/// behind an `Arc`.
///
/// # Example
/// ```
/// use scryfall_client::infrastructure::http::SlidingWindowLimiter;
/// use std::time::Duration;
///
/// let limiter = SlidingWindowLimiter::new(Duration::from_secs(1), 2);
/// assert!(limiter.try_admit());
/// assert!(limiter.try_admit());
/// assert!(!limiter.try_admit());
/// ```
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    window: Duration,
    max_per_window: usize,
    /// Admission instants, oldest first
    events: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    /// Create a limiter admitting `max_per_window` requests per `window`
    ///
    /// A capacity of zero never admits; a zero window admits every call.
    pub fn new(window: Duration, max_per_window: usize) -> Self {
        Self {
            window,
            max_per_window,
            events: Mutex::new(VecDeque::with_capacity(max_per_window)),
        }
    }

    /// Length of the sliding window
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Maximum admissions inside one window
    pub const fn max_per_window(&self) -> usize {
        self.max_per_window
    }

    /// Try to admit one request right now
    ///
    /// Prunes stale events, then records `now` and returns `true` if a slot
    /// is free. Returns `false` without touching the recorded events
    /// otherwise. Prune, check and append happen under one lock, so two
    /// racing callers can never both take the last slot.
    pub fn try_admit(&self) -> bool {
        let now = Instant::now();
        let mut events = self.lock();
        Self::prune(&mut events, now, self.window);

        if events.len() >= self.max_per_window {
            trace!(
                in_window = events.len(),
                max_per_window = self.max_per_window,
                "Admission rejected"
            );
            return false;
        }

        events.push_back(now);
        true
    }

    /// Number of requests that would be admitted right now
    pub fn available(&self) -> usize {
        let mut events = self.lock();
        Self::prune(&mut events, Instant::now(), self.window);
        self.max_per_window.saturating_sub(events.len())
    }

    /// Time until the oldest recorded event leaves the window
    ///
    /// Returns `Duration::ZERO` when a slot is already free. With a capacity
    /// of zero no slot ever frees up and the full window is returned.
    pub fn time_until_available(&self) -> Duration {
        let now = Instant::now();
        let mut events = self.lock();
        Self::prune(&mut events, now, self.window);

        if events.len() < self.max_per_window {
            return Duration::ZERO;
        }

        events.front().map_or(self.window, |oldest| {
            self.window
                .saturating_sub(now.saturating_duration_since(*oldest))
        })
    }

    /// Drop events whose age has reached the window, oldest first
    fn prune(events: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = events.front() {
            if now.saturating_duration_since(*oldest) < window {
                break;
            }
            events.pop_front();
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Instant>> {
        // Events stay consistent even if a holder panicked
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
