//! Clock abstraction and the debounced pending value.
//!
//! [`Debouncer`] holds at most one pending value. Scheduling a new value
//! replaces the old one and restarts the delay, so a burst of changes
//! produces a single release carrying the last value. Nothing here sleeps:
//! the owner polls with the current instant from a [`Clock`].

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Pending value released once `delay` has passed since it was scheduled.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    /// Creates an idle debouncer.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value and restarts the delay from `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Takes the pending value if its deadline is at or before `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Takes the pending value regardless of its deadline.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
