//! Logical time.
//!
//! The engine never reads a wall clock. Time is a monotonic tick counter
//! (a slot, a block height, or a test-controlled counter) supplied by a
//! [`Clock`]; it must strictly increase between operations that belong to
//! different submissions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the logical clock, measured in ticks.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Tick zero.
    pub const EPOCH: Self = Self(0);

    pub const fn new(ticks: u64) -> Self {
        Self(ticks)
    }

    pub const fn ticks(&self) -> u64 {
        self.0
    }

    /// Ticks elapsed since this timestamp (relative to `now`), saturating at zero.
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// This timestamp shifted `ticks` into the future; `None` on overflow.
    pub fn checked_add(&self, ticks: u64) -> Option<Timestamp> {
        self.0.checked_add(ticks).map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Source of the current logical time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
