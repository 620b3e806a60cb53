#![forbid(unsafe_code)]

//! Deadline timers driven by the caller's clock.
//!
//! Nothing here spawns a thread or registers a callback. The host passes the
//! current [`Instant`] into `poll`, so timers fire on the same loop that
//! delivers pointer events and tests can drive time explicitly.
//!
//! # Invariants
//!
//! 1. A [`Debouncer`] fires at most once per `trigger` burst.
//! 2. [`IntervalTimer::poll`] reports every elapsed tick exactly once, even
//!    when the host polls late.

use web_time::{Duration, Instant};

/// Collapses a burst of triggers into one firing `delay` after the last one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm, or push back, the deadline.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` once when the deadline has passed, then disarms.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Fixed-rate repeating timer.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    next: Option<Instant>,
}

impl IntervalTimer {
    /// A zero interval is raised to one millisecond.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next: None,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Start ticking. Calling this while running keeps the current phase.
    pub fn start(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + self.interval);
        }
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Number of ticks that elapsed since the previous poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };
        let mut ticks = 0u32;
        while now >= next {
            ticks = ticks.saturating_add(1);
            next += self.interval;
        }
        self.next = Some(next);
        ticks
    }
}
