//! Pro-rated allowance projection
//!
//! Spreads a budget evenly over the days of a range and reports how much of
//! it has become available by a given day. No rounding happens here.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::inclusive_days;
use super::cycle::resolve_monthly_cycle;
use super::week::resolve_week;
use crate::models::DateRange;

/// How much of a budget is available as of a day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllowanceProjection {
    /// Days in the range, both ends included
    pub days_in_range: i64,
    /// Budget per day
    pub daily_budget: f64,
    /// Days from the range start through today (clamped into the range)
    pub days_elapsed: i64,
    /// `daily_budget * days_elapsed`
    pub allowed_by_today: f64,
}

impl AllowanceProjection {
    /// What is left of today's allowance after the spend so far.
    /// Negative when spending runs ahead of the schedule.
    pub fn net_of(&self, spent_to_date: f64) -> f64 {
        self.allowed_by_today - spent_to_date
    }
}

/// Project `total_budget` over `range` as of `today`.
///
/// A `today` before the range counts as its first day and one after it as
/// its last, so `days_elapsed` is always within `1..=days_in_range`.
pub fn project_allowance(
    today: NaiveDate,
    range: &DateRange,
    total_budget: f64,
) -> AllowanceProjection {
    let days_in_range = inclusive_days(range.start, range.end);
    let daily_budget = total_budget / days_in_range as f64;
    let days_elapsed = inclusive_days(range.start, range.clamp(today));

    AllowanceProjection {
        days_in_range,
        daily_budget,
        days_elapsed,
        allowed_by_today: daily_budget * days_elapsed as f64,
    }
}

/// Allowance left today: `allowed_by_today - spent_to_date`
pub fn net_allowance(projection: &AllowanceProjection, spent_to_date: f64) -> f64 {
    projection.net_of(spent_to_date)
}

/// Projection over the monthly cycle containing `today`
pub fn monthly_allowance(today: NaiveDate, start_day: u32, total_budget: f64) -> AllowanceProjection {
    project_allowance(today, &resolve_monthly_cycle(today, start_day), total_budget)
}

/// Projection over the budget week containing `today`
pub fn weekly_allowance(
    today: NaiveDate,
    week_start_day: u32,
    total_budget: f64,
) -> AllowanceProjection {
    project_allowance(today, &resolve_week(today, week_start_day), total_budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_mid_cycle_projection() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31));
        let p = project_allowance(date(2024, 3, 15), &range, 310.0);

        assert_eq!(p.days_in_range, 31);
        assert_eq!(p.days_elapsed, 15);
        assert!(approx_eq(p.daily_budget, 10.0));
        assert!(approx_eq(p.allowed_by_today, 150.0));
        assert!(approx_eq(p.net_of(170.0), -20.0));
        assert_eq!(net_allowance(&p, 170.0), p.net_of(170.0));
    }

    #[test]
    fn test_clamps_before_and_after_range() {
        let range = DateRange::new(date(2024, 3, 11), date(2024, 3, 17));

        let before = project_allowance(date(2024, 3, 1), &range, 70.0);
        assert_eq!(before.days_elapsed, 1);
        assert!(approx_eq(before.allowed_by_today, 10.0));

        let after = project_allowance(date(2024, 4, 1), &range, 70.0);
        assert_eq!(after.days_elapsed, 7);
        assert!(approx_eq(after.allowed_by_today, 70.0));
    }

    #[test]
    fn test_daily_budget_conserves_total() {
        for start_day in 1..=28 {
            let mut today = date(2024, 1, 1);
            while today <= date(2024, 12, 31) {
                let cycle = resolve_monthly_cycle(today, start_day);
                let p = project_allowance(today, &cycle, 40.0);
                assert!(approx_eq(p.daily_budget * p.days_in_range as f64, 40.0));
                today += Duration::days(13);
            }
        }
    }

    #[test]
    fn test_allowance_is_monotonic_and_reaches_total() {
        let range = resolve_monthly_cycle(date(2024, 2, 20), 10);
        let total = 1234.56;

        let mut previous = f64::MIN;
        for day in range.iter_days() {
            let p = project_allowance(day, &range, total);
            assert!(p.allowed_by_today >= previous);
            assert!(p.days_elapsed >= 1 && p.days_elapsed <= p.days_in_range);
            previous = p.allowed_by_today;
        }

        let at_end = project_allowance(range.end, &range, total);
        assert_eq!(at_end.days_elapsed, at_end.days_in_range);
        assert!(approx_eq(at_end.allowed_by_today, total));
    }

    #[test]
    fn test_monthly_and_weekly_helpers() {
        let monthly = monthly_allowance(date(2024, 3, 15), 1, 40.0);
        assert_eq!(monthly.days_in_range, 31);
        assert_eq!(monthly.days_elapsed, 15);

        // Friday in a Monday week is day 5
        let weekly = weekly_allowance(date(2024, 3, 15), 1, 1300.0);
        assert_eq!(weekly.days_in_range, 7);
        assert_eq!(weekly.days_elapsed, 5);
        assert!(approx_eq(weekly.allowed_by_today, 1300.0 / 7.0 * 5.0));
    }
}
