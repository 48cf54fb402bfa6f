//! Reports module for allowance-cli
//!
//! The weekly/monthly dashboard and the per-day breakdown of a week.

pub mod dashboard;
pub mod details;

pub use dashboard::{DashboardReport, MonthlySummary, WeeklySummary};
pub use details::{DayGroup, WeeklyDetailsReport};
