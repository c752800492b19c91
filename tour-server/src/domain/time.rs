//! Wall-clock handling for tour schedules.
//!
//! Catalogs give opening hours as "HH:MM" strings. A tour stays within one
//! day, but a prospective tour may push the running clock past midnight while
//! it is being evaluated, so times are stored as an offset from midnight rather
//! than as a `NaiveTime` that would silently wrap.

use chrono::Duration;
use std::fmt;
use std::ops::{Add, Sub};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time of day, second resolution.
///
/// # Examples
///
/// ```
/// use tour_server::domain::ClockTime;
/// use chrono::Duration;
///
/// let start = ClockTime::parse_hhmm("08:00").unwrap();
/// let later = start + Duration::minutes(75);
/// assert_eq!(later.to_string(), "09:15");
/// assert!(later > start);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(Duration);

impl ClockTime {
    /// Create a time from hour, minute and second components.
    ///
    /// Returns `None` if any component is out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        let secs = i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second);
        Some(Self(Duration::seconds(secs)))
    }

    /// Midnight at the start of the day.
    pub fn start_of_day() -> Self {
        Self(Duration::zero())
    }

    /// The last second of the day (23:59:59).
    pub fn end_of_day() -> Self {
        Self(Duration::seconds(24 * 3600 - 1))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use tour_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("0800").is_err());
    /// assert!(ClockTime::parse_hhmm("8:00").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hms(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Parse an optional "HH:MM" field, using `default` when it is blank.
    pub fn parse_or(s: &str, default: Self) -> Result<Self, TimeError> {
        let s = s.trim();
        if s.is_empty() {
            Ok(default)
        } else {
            Self::parse_hhmm(s)
        }
    }

    /// Returns the hour of the (possibly wrapped) day, 0-23.
    pub fn hour(&self) -> u32 {
        ((self.0.num_seconds() / 3600).rem_euclid(24)) as u32
    }

    /// Returns the minute, 0-59.
    pub fn minute(&self) -> u32 {
        ((self.0.num_seconds() / 60).rem_euclid(60)) as u32
    }

    /// Returns the duration from `earlier` to `self`.
    ///
    /// Negative if `earlier` is actually later.
    pub fn signed_duration_since(&self, earlier: Self) -> Duration {
        self.0 - earlier.0
    }
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

impl Add<Duration> for ClockTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub for ClockTime {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        self.signed_duration_since(rhs)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({})", self)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
