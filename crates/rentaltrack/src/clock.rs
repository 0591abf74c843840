//! Time sources for rental events.
//!
//! Every timestamp written into a customer's history comes from a [`Clock`].
//! Production code uses [`SystemClock`]; tests use [`FixedClock`] to get
//! deterministic histories.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

/// A source of the current instant.
pub trait Clock: std::fmt::Debug {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep a handle after giving
/// the clock to a registry and still advance it.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Rc<Cell<DateTime<Utc>>>,
}

impl FixedClock {
    /// Create a clock frozen at `instant`.
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Rc::new(Cell::new(instant)),
        }
    }

    /// Move the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.instant.set(instant);
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.instant.set(self.instant.get() + delta);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant.get()
    }
}
