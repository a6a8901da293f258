//! Wall-clock time-of-day parsing.
//!
//! Errand start and end times arrive as `HH:MM` strings (24-hour, zero
//! padded). [`parse`] turns them into a [`ClockTime`], a totally ordered
//! value backed by [`chrono::NaiveTime`]. Anything that is not exactly
//! `HH:MM` is rejected with [`ErrandError::InvalidTimeFormat`]; there is no
//! lenient fallback (`"9:5"`, `"9am"` and `"noon"` all fail).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{ErrandError, Result};

/// A time of day with minute precision.
///
/// Ordering follows the clock: `00:00` is the smallest value and `23:59` the
/// largest. Serializes as its `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a clock time from hour and minute, if both are in range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// The underlying chrono value.
    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

/// Parse a 24-hour `HH:MM` string into a [`ClockTime`].
///
/// # Errors
///
/// Returns [`ErrandError::InvalidTimeFormat`] if `raw` is not exactly two
/// digits, a colon, and two digits, or if the hour or minute is out of range.
///
/// # Examples
///
/// ```
/// use errand_engine::clock::parse;
///
/// let nine = parse("09:00").unwrap();
/// let ten = parse("10:00").unwrap();
/// assert!(nine < ten);
/// assert!(parse("25:61").is_err());
/// ```
pub fn parse(raw: &str) -> Result<ClockTime> {
    let invalid = || ErrandError::InvalidTimeFormat(raw.to_string());

    let bytes = raw.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let hour = two_digits(bytes[0], bytes[1]).ok_or_else(invalid)?;
    let minute = two_digits(bytes[3], bytes[4]).ok_or_else(invalid)?;

    ClockTime::from_hm(hour, minute).ok_or_else(invalid)
}

fn two_digits(tens: u8, ones: u8) -> Option<u32> {
    if tens.is_ascii_digit() && ones.is_ascii_digit() {
        Some(u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
    } else {
        None
    }
}

impl FromStr for ClockTime {
    type Err = ErrandError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ErrandError;

    fn try_from(s: String) -> Result<Self> {
        parse(&s)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
