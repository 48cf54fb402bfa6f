//! Monthly cycle resolution
//!
//! A monthly cycle runs from its anchor day in one month up to the day before
//! the anchor day in the next month. With a start day of 1 this is simply the
//! calendar month.

use chrono::{Datelike, Duration, NaiveDate};

use super::calendar::{month_anchor, next_month, previous_month};
use crate::models::DateRange;

/// Resolve the monthly cycle containing `today`.
///
/// If `today` is on or after `start_day` the cycle began this month,
/// otherwise it began in the previous month. The end is the day before the
/// following cycle starts, so consecutive cycles tile the calendar with no
/// gaps or overlaps. Start days past the end of a month roll to the first
/// day of the next month (see [`month_anchor`]).
pub fn resolve_monthly_cycle(today: NaiveDate, start_day: u32) -> DateRange {
    let (year, month) = if today.day() >= start_day {
        (today.year(), today.month())
    } else {
        previous_month(today.year(), today.month())
    };

    let start = month_anchor(year, month, start_day);
    let (next_year, next_month) = next_month(year, month);
    let end = month_anchor(next_year, next_month, start_day) - Duration::days(1);

    DateRange { start, end }
}
