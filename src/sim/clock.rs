//! Fixed-rate frame clock
//!
//! Decides when the next update+render cycle is due. Missed frames are
//! skipped, not caught up: a late cycle restarts the interval from the
//! moment it actually ran.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true (and restarts the interval) if a cycle is due at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last = Some(now);
        }
        due
    }

    /// How long to wait from `now` until the next cycle is due
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.last {
            None => Duration::ZERO,
            Some(last) => (last + self.interval).saturating_duration_since(now),
        }
    }
}
