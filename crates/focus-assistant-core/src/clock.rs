//! Millisecond clock used by the monitor.
//!
//! Timestamps are a wrapping `u32` millisecond counter, the same width as a
//! microcontroller `millis()` register. All elapsed-time arithmetic goes
//! through [`Timestamp::elapsed_since`], which uses wrapping subtraction so a
//! counter overflow never panics and short intervals across the wrap still
//! measure correctly.

use std::cell::Cell;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Milliseconds since an arbitrary epoch. Wraps after ~49.7 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u32);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn as_millis(self) -> u32 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`, wraparound-safe.
    pub fn elapsed_since(self, earlier: Timestamp) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Timestamp `ms` milliseconds later, wrapping at `u32::MAX`.
    pub fn add_millis(self, ms: u32) -> Timestamp {
        Timestamp(self.0.wrapping_add(ms))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Source of monotonic time for the control loop.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock derived from [`Instant`], zeroed at construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    started: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        // Truncation is the wrap.
        Timestamp(self.started.elapsed().as_millis() as u32)
    }
}

/// Clock advanced by hand. Used by the simulator and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start.0),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set(&self, at: Timestamp) {
        self.now.set(at.0);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.get())
    }
}
