//! Millisecond timestamps and the clock abstraction the engine reads them from.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
///
/// Serialized as a bare number, matching the `timestamp` / `lastModified`
/// fields of the configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp at the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();
        Self(millis)
    }

    /// Creates a timestamp from raw milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the raw milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

/// Source of timestamps for records and generated ids.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to. Each read advances it by `step`
/// milliseconds so consecutive operations get distinct timestamps.
#[derive(Debug)]
pub struct ManualClock {
    current: Cell<i64>,
    step: i64,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            current: Cell::new(start),
            step,
        }
    }

    /// Jumps the clock to an absolute time.
    pub fn set(&self, millis: i64) {
        self.current.set(millis);
    }

    /// Returns the next reading without advancing.
    #[must_use]
    pub fn peek(&self) -> Timestamp {
        Timestamp(self.current.get())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let value = self.current.get();
        self.current.set(value.saturating_add(self.step));
        Timestamp(value)
    }
}
