// crates/booking-gate-core/src/core/time.rs
// ============================================================================
// Module: Booking Gate Time Primitives
// Description: Minute-granularity wall-clock values, intervals, and date windows.
// Purpose: Provide deterministic calendar arithmetic for policy evaluation.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Booking Gate evaluates policies at minute granularity against explicit,
//! caller-supplied instants. The engine never reads wall-clock time; hosts
//! inject the evaluation instant so results are deterministic and replayable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::Date;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

// ============================================================================
// SECTION: Time Of Day
// ============================================================================

/// Wall-clock minute of day in the range `00:00..=23:59`.
///
/// # Invariants
/// - The wrapped minute count is always below [`MINUTES_PER_DAY`].
/// - The wire form is `"HH:MM"`, matching the policy schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// First minute of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// Creates a time of day from hour and minute components.
    ///
    /// # Errors
    ///
    /// Returns [`TimeParseError::OutOfRange`] when the components exceed the day.
    pub const fn from_hm(hour: u8, minute: u8) -> Result<Self, TimeParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeParseError::OutOfRange {
                hour,
                minute,
            });
        }
        Ok(Self(hour as u16 * 60 + minute as u16))
    }

    /// Creates a time of day from a minute-of-day count.
    ///
    /// # Errors
    ///
    /// Returns [`TimeParseError::MinuteOfDayOutOfRange`] when the count exceeds the day.
    pub const fn from_minute_of_day(minute: u16) -> Result<Self, TimeParseError> {
        if minute >= MINUTES_PER_DAY {
            return Err(TimeParseError::MinuteOfDayOutOfRange(minute));
        }
        Ok(Self(minute))
    }

    /// Returns the minute-of-day count.
    #[must_use]
    pub const fn minute_of_day(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = value
            .split_once(':')
            .ok_or_else(|| TimeParseError::Malformed(value.to_string()))?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(TimeParseError::Malformed(value.to_string()));
        }
        let hour: u8 = hour.parse().map_err(|_| TimeParseError::Malformed(value.to_string()))?;
        let minute: u8 =
            minute.parse().map_err(|_| TimeParseError::Malformed(value.to_string()))?;
        Self::from_hm(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Errors raised when parsing or constructing wall-clock times.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// Input does not match the `HH:MM` wire form.
    #[error("time must use the HH:MM form, got \"{0}\"")]
    Malformed(String),
    /// Hour or minute component exceeds the day.
    #[error("time components out of range: hour {hour}, minute {minute}")]
    OutOfRange {
        /// Offending hour component.
        hour: u8,
        /// Offending minute component.
        minute: u8,
    },
    /// Minute-of-day count exceeds the day.
    #[error("minute of day {0} exceeds the day")]
    MinuteOfDayOutOfRange(u16),
}

// ============================================================================
// SECTION: Time Spans
// ============================================================================

/// Half-open minute interval `[start, end)` on a single day axis.
///
/// # Invariants
/// - Positions are minutes relative to the day's midnight and may extend past
///   the end of the day (buffered intervals) or before it (buffer subtraction).
/// - An interval with `end_min <= start_min` is empty and overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Inclusive start position in minutes from midnight.
    pub start_min: i32,
    /// Exclusive end position in minutes from midnight.
    pub end_min: i32,
}

impl TimeSpan {
    /// Creates a span from explicit minute positions.
    #[must_use]
    pub const fn new(start_min: i32, end_min: i32) -> Self {
        Self {
            start_min,
            end_min,
        }
    }

    /// Creates a span covering a service that starts at `start` and runs for
    /// `duration_min` minutes.
    #[must_use]
    pub const fn from_start_duration(start: TimeOfDay, duration_min: u16) -> Self {
        let start_min = start.minute_of_day() as i32;
        Self {
            start_min,
            end_min: start_min + duration_min as i32,
        }
    }

    /// Returns true when the span contains no minutes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end_min <= self.start_min
    }

    /// Returns true when two half-open spans share at least one minute.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// Returns the number of minutes shared by two spans.
    #[must_use]
    pub const fn overlap_minutes(self, other: Self) -> u32 {
        let start = if self.start_min > other.start_min { self.start_min } else { other.start_min };
        let end = if self.end_min < other.end_min { self.end_min } else { other.end_min };
        if end > start { (end - start) as u32 } else { 0 }
    }
}

// ============================================================================
// SECTION: Evaluation Instant
// ============================================================================

/// Caller-supplied "now" used for lead-time and horizon checks.
///
/// # Invariants
/// - Values are explicitly provided by callers; the engine never reads
///   wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationInstant {
    /// Calendar date of the instant.
    pub date: Date,
    /// Wall-clock time of the instant.
    pub time: TimeOfDay,
}

impl EvaluationInstant {
    /// Creates an evaluation instant.
    #[must_use]
    pub const fn new(date: Date, time: TimeOfDay) -> Self {
        Self {
            date,
            time,
        }
    }
}

// ============================================================================
// SECTION: Date Helpers
// ============================================================================

/// Returns the weekday index with Sunday as zero, matching the policy schema.
#[must_use]
pub fn weekday_index(date: Date) -> u8 {
    date.weekday().number_days_from_sunday()
}

/// Returns the whole-day offset of `date` relative to `base`.
///
/// Negative values indicate dates before `base`.
#[must_use]
pub fn day_offset(date: Date, base: Date) -> i64 {
    (date - base).whole_days()
}

/// Inclusive calendar window with optional open bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound; `None` means unbounded in the past.
    pub from: Option<Date>,
    /// Inclusive upper bound; `None` means unbounded in the future.
    pub to: Option<Date>,
}

impl DateRange {
    /// Creates a window from optional bounds.
    #[must_use]
    pub const fn new(from: Option<Date>, to: Option<Date>) -> Self {
        Self {
            from,
            to,
        }
    }

    /// Returns true when the date falls inside the window.
    #[must_use]
    pub fn contains(self, date: Date) -> bool {
        self.from.is_none_or(|from| from <= date) && self.to.is_none_or(|to| date <= to)
    }
}
