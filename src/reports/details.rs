//! Weekly Details Report
//!
//! Purchases of one budget week grouped by day, with links to the
//! neighbouring weeks.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::display::{format_currency, format_week_range_human};
use crate::display::format::truncate;
use crate::engine::sum_in_range;
use crate::error::AllowanceResult;
use crate::models::{DateRange, Purchase};
use crate::services::{PeriodService, PurchaseService};
use crate::storage::Storage;

/// Purchases made on one day
#[derive(Debug, Clone)]
pub struct DayGroup {
    pub date: NaiveDate,
    /// Short weekday name ("Mon")
    pub weekday: String,
    pub total: f64,
    pub items: Vec<Purchase>,
}

/// Weekly Details Report
#[derive(Debug, Clone)]
pub struct WeeklyDetailsReport {
    pub week: DateRange,
    pub currency_code: String,
    /// Days with purchases, newest first
    pub days: Vec<DayGroup>,
    pub total: f64,
    pub prev_start: NaiveDate,
    pub next_start: NaiveDate,
    /// The next week lies in the future
    pub next_disabled: bool,
}

impl WeeklyDetailsReport {
    /// Generate details for the week containing `base`
    pub fn generate(
        storage: &Storage,
        settings: &Settings,
        today: NaiveDate,
        base: NaiveDate,
    ) -> AllowanceResult<Self> {
        let periods = PeriodService::new(settings);
        let week = periods.week_containing(base);
        let purchases = PurchaseService::new(storage).active_in_range(&week)?;

        let mut by_date: BTreeMap<NaiveDate, Vec<Purchase>> = BTreeMap::new();
        for purchase in &purchases {
            by_date.entry(purchase.date).or_default().push(purchase.clone());
        }

        let days = by_date
            .into_iter()
            .rev()
            .map(|(date, items)| DayGroup {
                date,
                weekday: date.format("%a").to_string(),
                total: sum_in_range(&items, date, date),
                items,
            })
            .collect();

        Ok(Self {
            week,
            currency_code: settings.currency_code.clone(),
            days,
            total: sum_in_range(&purchases, week.start, week.end),
            prev_start: periods.previous_week(&week).start,
            next_start: periods.next_week(&week).start,
            next_disabled: periods.next_week_disabled(&week, today),
        })
    }

    /// Number of purchases in the week
    pub fn purchase_count(&self) -> usize {
        self.days.iter().map(|d| d.items.len()).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} ({})\n",
            format_week_range_human(&self.week),
            self.week
        ));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if self.days.is_empty() {
            output.push_str("No purchases this week.\n");
        }

        for day in &self.days {
            output.push_str(&format!(
                "\n{} {} {:>20}\n",
                day.weekday,
                day.date.format("%Y-%m-%d"),
                format_currency(day.total, &self.currency_code)
            ));
            for item in &day.items {
                let description = if item.description.is_empty() {
                    "-".to_string()
                } else {
                    truncate(&item.description, 24)
                };
                output.push_str(&format!(
                    "  {:<12} {:<24} {:>10}\n",
                    item.id.to_string(),
                    description,
                    format_currency(item.amount, &self.currency_code)
                ));
            }
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "Total: {} in {} purchases\n",
            format_currency(self.total, &self.currency_code),
            self.purchase_count()
        ));

        output.push_str(&format!("Previous week: --start {}\n", self.prev_start));
        if !self.next_disabled {
            output.push_str(&format!("Next week:     --start {}\n", self.next_start));
        }

        output
    }

    /// Export the week's purchases to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> AllowanceResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Date", "Weekday", "ID", "Amount", "Description"])?;

        for day in &self.days {
            for item in &day.items {
                csv_writer.write_record([
                    day.date.format("%Y-%m-%d").to_string(),
                    day.weekday.clone(),
                    item.id.to_string(),
                    format!("{:.2}", item.amount),
                    item.description.clone(),
                ])?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}
