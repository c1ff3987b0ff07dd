use crate::clock::{Clock, Timestamp};
use chrono::Duration;
use std::fmt;

/// Time left until an auction ends, never negative
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    pub fn until(end: Timestamp, now: Timestamp) -> Self {
        Self {
            remaining: (end - now).max(Duration::zero()),
        }
    }

    pub fn from_clock(end: Timestamp, clock: &dyn Clock) -> Self {
        Self::until(end, clock.now())
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining.is_zero()
    }

    pub fn seconds(&self) -> i64 {
        self.remaining.num_seconds() % 60
    }

    pub fn minutes(&self) -> i64 {
        self.remaining.num_minutes() % 60
    }

    /// Hours within the current day; whole days are not shown
    pub fn hours(&self) -> i64 {
        self.remaining.num_hours() % 24
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours(), self.minutes(), self.seconds())
    }
}
