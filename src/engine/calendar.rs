//! Calendar helpers shared by the resolvers
//!
//! Weekdays are numbered 0 = Sunday .. 6 = Saturday, matching the
//! `week_start_day` setting.

use chrono::{Datelike, NaiveDate};

/// Weekday of a date, 0 = Sunday .. 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Inclusive number of days from `start` to `end`
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// The month before `(year, month)`
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// The month after `(year, month)`
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Number of days in a month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = next_month(year, month);
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(ny, nm, 1),
    ) {
        (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
        _ => 30,
    }
}

/// The day a monthly cycle anchored on `day` starts in `(year, month)`.
///
/// When the month has no such day (the 30th of February), the anchor rolls
/// to the first day of the following month. It is not clamped to the month's
/// last day: with `day = 31`, February's anchor is March 1, so the cycle
/// around 2024-03-15 is 2024-03-01 to 2024-03-30.
pub fn month_anchor(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.max(1);
    if day <= days_in_month(year, month) {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return date;
        }
    }
    let (ny, nm) = next_month(year, month);
    NaiveDate::from_ymd_opt(ny, nm, 1).unwrap_or(NaiveDate::MAX)
}
