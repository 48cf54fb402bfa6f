//! CLI commands for the dashboard and weekly details

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::error::{AllowanceError, AllowanceResult};
use crate::reports::{DashboardReport, WeeklyDetailsReport};
use crate::services::PeriodService;
use crate::storage::Storage;

/// Handle `allowance summary`
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    week: Option<String>,
    json: bool,
) -> AllowanceResult<()> {
    let selected_week = week
        .as_deref()
        .map(|w| PeriodService::new(settings).parse_date(w, today))
        .transpose()?;

    let report = DashboardReport::generate(storage, settings, today, selected_week)?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}

/// Handle `allowance details`
pub fn handle_details_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    start: Option<String>,
    output: Option<PathBuf>,
) -> AllowanceResult<()> {
    let base = match start {
        Some(s) => PeriodService::new(settings).parse_date(&s, today)?,
        None => today,
    };

    let report = WeeklyDetailsReport::generate(storage, settings, today, base)?;

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            AllowanceError::Io(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("Week details exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}
