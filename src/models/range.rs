//! Inclusive calendar date ranges
//!
//! Monthly cycles and budget weeks are both represented as a `DateRange`.
//! Both ends are inclusive: the range covers `start` from the first instant of
//! the day through the last instant of `end`.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; the ends are swapped if given out of order
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Number of days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Check if a day falls within this range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Project a day onto the range, snapping to the nearest end
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.start, self.end)
    }

    /// First instant of the start day
    pub fn start_instant(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Last representable instant of the end day
    pub fn end_instant(&self) -> NaiveDateTime {
        self.end.and_time(end_of_day())
    }

    /// The same range moved by a number of days
    pub fn shifted(&self, days: i64) -> Self {
        Self {
            start: self.start + Duration::days(days),
            end: self.end + Duration::days(days),
        }
    }

    /// Iterate over every day in the range
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Parse `YYYY-MM-DD..YYYY-MM-DD`
    pub fn parse(s: &str) -> Result<Self, RangeParseError> {
        let s = s.trim();
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| RangeParseError::InvalidFormat(s.to_string()))?;

        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
            .map_err(|_| RangeParseError::InvalidFormat(s.to_string()))?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")
            .map_err(|_| RangeParseError::InvalidFormat(s.to_string()))?;

        if end < start {
            return Err(RangeParseError::Reversed(s.to_string()));
        }

        Ok(Self { start, end })
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN)
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Error type for range parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeParseError {
    InvalidFormat(String),
    Reversed(String),
}

impl fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeParseError::InvalidFormat(s) => write!(f, "Invalid date range: {}", s),
            RangeParseError::Reversed(s) => write!(f, "Date range ends before it starts: {}", s),
        }
    }
}

impl std::error::Error for RangeParseError {}
