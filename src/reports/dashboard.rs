//! Dashboard Report
//!
//! The monthly and weekly budget summary shown by `allowance summary`.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::settings::Settings;
use crate::display::{
    format_currency, format_range, format_status_line, format_week_range_human, render_icon_strip,
};
use crate::engine::{
    derive_icon_layout, net_allowance, project_allowance, sum_detailed, sum_in_range,
    AllowanceProjection, IconLayout, SpendAggregate,
};
use crate::error::AllowanceResult;
use crate::models::DateRange;
use crate::services::{PeriodService, PurchaseService};
use crate::storage::Storage;

/// Monthly cycle figures
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub cycle: DateRange,
    pub budget: f64,
    /// Spent over the whole cycle
    pub spent: f64,
    pub budget_left: f64,
    pub projection: AllowanceProjection,
    /// Spent from the cycle start through today
    pub spent_to_date: f64,
    /// Allowance available today after spending so far
    pub allowed_net: f64,
}

/// Weekly figures, including the icon strip
#[derive(Debug, Clone, Serialize)]
pub struct WeeklySummary {
    pub week: DateRange,
    pub budget: f64,
    pub big_threshold: f64,
    pub aggregate: SpendAggregate,
    pub weekly_left: f64,
    pub projection: AllowanceProjection,
    pub spent_to_date: f64,
    pub allowed_net: f64,
    pub icons: IconLayout,
    pub is_current_week: bool,
}

/// Dashboard Report
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub today: NaiveDate,
    pub currency_code: String,
    pub monthly: MonthlySummary,
    pub weekly: WeeklySummary,
}

impl DashboardReport {
    /// Generate the dashboard as of `today`.
    ///
    /// The weekly block covers the week containing `selected_week` when
    /// given, otherwise the current week. The monthly block always covers
    /// the current cycle.
    pub fn generate(
        storage: &Storage,
        settings: &Settings,
        today: NaiveDate,
        selected_week: Option<NaiveDate>,
    ) -> AllowanceResult<Self> {
        let periods = PeriodService::new(settings);
        let purchases = PurchaseService::new(storage);

        let cycle = periods.current_cycle(today);
        let cycle_purchases = purchases.active_in_range(&cycle)?;
        let spent = sum_in_range(&cycle_purchases, cycle.start, cycle.end);
        let projection = project_allowance(today, &cycle, settings.monthly_budget);
        let spent_to_date = sum_in_range(&cycle_purchases, cycle.start, today);

        let monthly = MonthlySummary {
            cycle,
            budget: settings.monthly_budget,
            spent,
            budget_left: settings.monthly_budget - spent,
            projection,
            spent_to_date,
            allowed_net: net_allowance(&projection, spent_to_date),
        };

        let week = periods.week_containing(selected_week.unwrap_or(today));
        let week_purchases = purchases.active_in_range(&week)?;
        let big_threshold = settings.big_purchase_threshold();
        let aggregate = sum_detailed(&week_purchases, week.start, week.end, big_threshold);
        let week_projection = project_allowance(today, &week, settings.weekly_budget);
        let week_spent_to_date = sum_in_range(&week_purchases, week.start, today);

        let weekly = WeeklySummary {
            week,
            budget: settings.weekly_budget,
            big_threshold,
            aggregate,
            weekly_left: settings.weekly_budget - aggregate.total,
            projection: week_projection,
            spent_to_date: week_spent_to_date,
            allowed_net: net_allowance(&week_projection, week_spent_to_date),
            icons: derive_icon_layout(
                aggregate.total,
                settings.weekly_budget,
                aggregate.big_total,
                aggregate.small_total,
            ),
            is_current_week: periods.is_current_week(&week, today),
        };

        debug!(
            %today,
            cycle = %monthly.cycle,
            week = %weekly.week,
            month_spent = monthly.spent,
            week_spent = weekly.aggregate.total,
            "generated dashboard"
        );

        Ok(Self {
            today,
            currency_code: settings.currency_code.clone(),
            monthly,
            weekly,
        })
    }

    fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.currency_code)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        let monthly = &self.monthly;
        let weekly = &self.weekly;

        let week_title = if weekly.is_current_week {
            format!("This week: {}", format_week_range_human(&weekly.week))
        } else {
            format!("Week of {}", format_week_range_human(&weekly.week))
        };
        output.push_str(&week_title);
        output.push('\n');
        output.push_str(&"=".repeat(50));
        output.push('\n');

        for line in render_icon_strip(&weekly.icons) {
            output.push_str(&line);
            output.push('\n');
        }
        output.push_str(&format!(
            "{} of {} used\n",
            self.money(weekly.aggregate.total),
            self.money(weekly.budget)
        ));
        output.push_str(&format_status_line(
            &weekly.aggregate,
            weekly.weekly_left,
            &self.currency_code,
        ));
        output.push('\n');
        output.push_str(&format!(
            "  {:<24} {:>12}\n",
            "Allowed by today:",
            self.money(weekly.allowed_net)
        ));

        output.push('\n');
        output.push_str(&format!("Monthly cycle: {}\n", format_range(&monthly.cycle)));
        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "  {:<24} {:>12}\n",
            "Budget:",
            self.money(monthly.budget)
        ));
        output.push_str(&format!("  {:<24} {:>12}\n", "Spent:", self.money(monthly.spent)));
        output.push_str(&format!(
            "  {:<24} {:>12}\n",
            "Left:",
            self.money(monthly.budget_left)
        ));
        output.push_str(&format!(
            "  {:<24} {:>12}\n",
            "Daily budget:",
            self.money(monthly.projection.daily_budget)
        ));
        output.push_str(&format!(
            "  {:<24} {:>12}\n",
            format!(
                "Day {} of {}:",
                monthly.projection.days_elapsed, monthly.projection.days_in_range
            ),
            self.money(monthly.projection.allowed_by_today)
        ));
        output.push_str(&format!(
            "  {:<24} {:>12}\n",
            "Spent to date:",
            self.money(monthly.spent_to_date)
        ));
        output.push_str(&format!(
            "  {:<24} {:>12}\n",
            "Allowed by today:",
            self.money(monthly.allowed_net)
        ));

        output
    }

    /// Export the report as pretty-printed JSON
    pub fn to_json(&self) -> AllowanceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AllowancePaths;
    use crate::models::Purchase;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn settings() -> Settings {
        Settings {
            monthly_budget: 310.0,
            budget_start_day: 1,
            weekly_budget: 100.0,
            week_start_day: 1,
            currency_code: "USD".into(),
            ..Settings::default()
        }
    }

    fn add(storage: &Storage, amount: f64, on: NaiveDate) -> Purchase {
        let purchase = Purchase::new(amount, on);
        storage.purchases.upsert(purchase.clone()).unwrap();
        purchase
    }

    #[test]
    fn test_empty_dashboard() {
        let (_temp_dir, storage) = create_test_storage();
        let report =
            DashboardReport::generate(&storage, &settings(), date(2024, 3, 15), None).unwrap();

        assert_eq!(report.monthly.cycle, DateRange::new(date(2024, 3, 1), date(2024, 3, 31)));
        assert_eq!(report.monthly.spent, 0.0);
        assert_eq!(report.monthly.budget_left, 310.0);
        assert_eq!(report.monthly.projection.days_elapsed, 15);
        assert!((report.monthly.allowed_net - 150.0).abs() < 1e-9);

        assert_eq!(report.weekly.week, DateRange::new(date(2024, 3, 11), date(2024, 3, 17)));
        assert!(report.weekly.is_current_week);
        assert_eq!(report.weekly.icons.empty_icons, 10);
    }

    #[test]
    fn test_dashboard_figures() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, 30.0, date(2024, 3, 11)); // big: threshold is 25
        add(&storage, 10.0, date(2024, 3, 14));
        add(&storage, 5.0, date(2024, 3, 16)); // after today
        add(&storage, 20.0, date(2024, 3, 2));
        add(&storage, 99.0, date(2024, 2, 29)); // previous cycle

        let mut deleted = add(&storage, 50.0, date(2024, 3, 12));
        deleted.soft_delete();
        storage.purchases.upsert(deleted).unwrap();

        let report =
            DashboardReport::generate(&storage, &settings(), date(2024, 3, 15), None).unwrap();

        assert_eq!(report.monthly.spent, 65.0);
        assert_eq!(report.monthly.spent_to_date, 60.0);
        assert_eq!(report.monthly.budget_left, 245.0);
        assert!((report.monthly.allowed_net - 90.0).abs() < 1e-9);

        let weekly = &report.weekly;
        assert_eq!(weekly.aggregate.total, 45.0);
        assert_eq!(weekly.aggregate.big_count, 1);
        assert_eq!(weekly.aggregate.small_count, 2);
        assert_eq!(weekly.weekly_left, 55.0);
        assert_eq!(weekly.spent_to_date, 40.0);
        assert_eq!(weekly.projection.days_elapsed, 5);
        assert_eq!(weekly.icons.used_icons, 5);
    }

    #[test]
    fn test_selected_past_week() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, 120.0, date(2024, 3, 5));

        let report = DashboardReport::generate(
            &storage,
            &settings(),
            date(2024, 3, 15),
            Some(date(2024, 3, 6)),
        )
        .unwrap();

        let weekly = &report.weekly;
        assert_eq!(weekly.week.start, date(2024, 3, 4));
        assert!(!weekly.is_current_week);
        assert_eq!(weekly.projection.days_elapsed, 7);
        assert_eq!(weekly.weekly_left, -20.0);
        assert_eq!(weekly.icons.warning_icons_total, 2);
    }

    #[test]
    fn test_format_terminal() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, 30.0, date(2024, 3, 11));

        let report =
            DashboardReport::generate(&storage, &settings(), date(2024, 3, 15), None).unwrap();
        let output = report.format_terminal();

        assert!(output.contains("This week: 11-17 March"));
        assert!(output.contains("$30.00 of $100.00 used"));
        assert!(output.contains("1 big (🌚) + 0 small (🌝) purchase — $70.00 left"));
        assert!(output.contains("Monthly cycle: 2024-03-01 .. 2024-03-31"));
        assert!(output.contains("Day 15 of 31:"));
    }

    #[test]
    fn test_to_json() {
        let (_temp_dir, storage) = create_test_storage();
        let report =
            DashboardReport::generate(&storage, &settings(), date(2024, 3, 15), None).unwrap();

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["weekly"]["icons"]["total_icons"], 10);
        assert_eq!(json["monthly"]["cycle"]["start"], "2024-03-01");
    }
}
