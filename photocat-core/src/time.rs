//! Clock abstraction for reading timestamps
//!
//! Readings carry naive local wall-clock time, matching how the persistence
//! layer stores them and how history buckets are keyed.
//! - [`SystemClock`] reads the host's local time
//! - [`FixedClock`] is set by hand for tests and replay

use chrono::{Duration, Local, NaiveDateTime};

/// Timestamp attached to readings (naive local time)
pub type Timestamp = NaiveDateTime;

/// Source of wall-clock time for generated readings
pub trait Clock {
    /// Current timestamp
    fn now(&self) -> Timestamp;
}

/// Host local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Local::now().naive_local()
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedClock {
    timestamp: Timestamp,
}

impl FixedClock {
    /// Clock stopped at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to `timestamp`
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `by`
    pub fn advance(&mut self, by: Duration) {
        self.timestamp += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
