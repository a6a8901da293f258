//! Start/end pairs of clock times.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::{self, ClockTime};
use crate::error::Result;

/// The time span of an errand.
///
/// `start < end` is not enforced. Zero-length and inverted intervals are
/// kept as given and fed to the overlap rule unchanged, so a zero-length
/// interval only overlaps an interval that strictly surrounds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Interval {
    pub const fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Parse both endpoints from `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrandError::InvalidTimeFormat`] for the first
    /// endpoint that fails to parse.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(clock::parse(start)?, clock::parse(end)?))
    }

    /// Half-open overlap: `self.start < other.end && other.start < self.end`.
    ///
    /// Touching endpoints (`09:00-10:00` and `10:00-11:00`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
