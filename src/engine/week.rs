//! Budget week resolution

use chrono::{Duration, NaiveDate};

use super::calendar::weekday_index;
use crate::models::DateRange;

/// Length of a budget week in days
pub const DAYS_IN_WEEK: i64 = 7;

/// Resolve the 7-day week containing `today` that starts on
/// `week_start_day` (0 = Sunday .. 6 = Saturday; larger values wrap).
pub fn resolve_week(today: NaiveDate, week_start_day: u32) -> DateRange {
    let dow = i64::from(weekday_index(today));
    let first = i64::from(week_start_day % 7);
    let diff = (dow - first + DAYS_IN_WEEK) % DAYS_IN_WEEK;

    let start = today - Duration::days(diff);
    DateRange {
        start,
        end: start + Duration::days(DAYS_IN_WEEK - 1),
    }
}
