//! Budget period service
//!
//! Resolves the monthly cycle and budget week for a day according to the
//! user's settings, and handles week-by-week navigation.

use chrono::{Duration, NaiveDate};

use crate::config::settings::Settings;
use crate::engine::week::DAYS_IN_WEEK;
use crate::engine::{resolve_monthly_cycle, resolve_week};
use crate::error::{AllowanceError, AllowanceResult};
use crate::models::DateRange;

/// Service for cycle and week lookup
pub struct PeriodService<'a> {
    settings: &'a Settings,
}

impl<'a> PeriodService<'a> {
    /// Create a new period service
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// The monthly cycle containing `today`
    pub fn current_cycle(&self, today: NaiveDate) -> DateRange {
        resolve_monthly_cycle(today, self.settings.budget_start_day)
    }

    /// The budget week containing `date`
    pub fn week_containing(&self, date: NaiveDate) -> DateRange {
        resolve_week(date, self.settings.week_start_day)
    }

    /// The week before `week`
    pub fn previous_week(&self, week: &DateRange) -> DateRange {
        self.week_containing(week.shifted(-DAYS_IN_WEEK).start)
    }

    /// The week after `week`
    pub fn next_week(&self, week: &DateRange) -> DateRange {
        self.week_containing(week.shifted(DAYS_IN_WEEK).start)
    }

    /// Check if `week` is the week containing `today`
    pub fn is_current_week(&self, week: &DateRange, today: NaiveDate) -> bool {
        week.start == self.week_containing(today).start
    }

    /// Whether navigating past `week` would move into the future
    pub fn next_week_disabled(&self, week: &DateRange, today: NaiveDate) -> bool {
        self.next_week(week).start > self.week_containing(today).start
    }

    /// Parse a day reference relative to `today`
    ///
    /// Formats supported: "today", "yesterday", "YYYY-MM-DD"
    pub fn parse_date(&self, s: &str, today: NaiveDate) -> AllowanceResult<NaiveDate> {
        let s_lower = s.trim().to_lowercase();

        match s_lower.as_str() {
            "today" | "now" => Ok(today),
            "yesterday" => Ok(today - Duration::days(1)),
            _ => NaiveDate::parse_from_str(&s_lower, "%Y-%m-%d").map_err(|_| {
                AllowanceError::Validation(format!(
                    "Invalid date: '{}'. Use YYYY-MM-DD, 'today' or 'yesterday'",
                    s.trim()
                ))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settings() -> Settings {
        Settings {
            budget_start_day: 10,
            week_start_day: 1,
            ..Settings::default()
        }
    }

    #[test]
    fn test_current_cycle_uses_start_day() {
        let settings = settings();
        let service = PeriodService::new(&settings);

        let cycle = service.current_cycle(date(2024, 3, 5));
        assert_eq!(cycle, DateRange::new(date(2024, 2, 10), date(2024, 3, 9)));
    }

    #[test]
    fn test_week_navigation() {
        let settings = settings();
        let service = PeriodService::new(&settings);

        let week = service.week_containing(date(2024, 3, 15));
        assert_eq!(week.start, date(2024, 3, 11));

        let prev = service.previous_week(&week);
        let next = service.next_week(&week);
        assert_eq!(prev, DateRange::new(date(2024, 3, 4), date(2024, 3, 10)));
        assert_eq!(next, DateRange::new(date(2024, 3, 18), date(2024, 3, 24)));
    }

    #[test]
    fn test_current_week_and_next_disabled() {
        let settings = settings();
        let service = PeriodService::new(&settings);
        let today = date(2024, 3, 15);

        let current = service.week_containing(today);
        assert!(service.is_current_week(&current, today));
        assert!(service.next_week_disabled(&current, today));

        let last_week = service.previous_week(&current);
        assert!(!service.is_current_week(&last_week, today));
        assert!(!service.next_week_disabled(&last_week, today));
    }

    #[test]
    fn test_parse_date() {
        let settings = settings();
        let service = PeriodService::new(&settings);
        let today = date(2024, 3, 15);

        assert_eq!(service.parse_date("today", today).unwrap(), today);
        assert_eq!(service.parse_date("Yesterday", today).unwrap(), date(2024, 3, 14));
        assert_eq!(service.parse_date(" 2024-02-29 ", today).unwrap(), date(2024, 2, 29));
        assert!(service.parse_date("2023-02-29", today).unwrap_err().is_validation());
        assert!(service.parse_date("15/03/2024", today).is_err());
    }
}
