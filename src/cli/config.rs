//! Setup and configuration commands

use clap::{Args, Subcommand};
use tracing::info;

use crate::config::paths::AllowancePaths;
use crate::config::settings::Settings;
use crate::display::format_currency;
use crate::error::{AllowanceError, AllowanceResult};
use crate::storage::initialize_storage;

/// Options for `allowance init`
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Amount allocated per week
    #[arg(long)]
    pub weekly_budget: Option<f64>,
    /// Amount allocated per monthly cycle
    #[arg(long)]
    pub monthly_budget: Option<f64>,
    /// Day of month the cycle starts on (1-28)
    #[arg(long)]
    pub budget_start_day: Option<u32>,
    /// First day of the week (0 = Sunday .. 6 = Saturday)
    #[arg(long)]
    pub week_start_day: Option<u32>,
    /// ISO currency code, e.g. USD, EUR, ILS
    #[arg(long)]
    pub currency: Option<String>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current settings and paths
    Show,
    /// Change a setting
    Set {
        /// One of: monthly-budget, budget-start-day, weekly-budget,
        /// week-start-day, big-purchase-ratio, currency
        key: String,
        /// New value
        value: String,
    },
}

/// Handle `allowance init`
pub fn handle_init_command(
    paths: &AllowancePaths,
    settings: &Settings,
    args: InitArgs,
) -> AllowanceResult<()> {
    let mut settings = settings.clone();

    if let Some(weekly) = args.weekly_budget {
        settings.weekly_budget = weekly;
    }
    if let Some(monthly) = args.monthly_budget {
        settings.monthly_budget = monthly;
    }
    if let Some(day) = args.budget_start_day {
        settings.budget_start_day = day;
    }
    if let Some(day) = args.week_start_day {
        settings.week_start_day = day;
    }
    if let Some(currency) = args.currency {
        settings.set_currency(&currency);
    }

    initialize_storage(paths, &settings)?;
    info!(path = %paths.base_dir().display(), "initialized allowance-cli");

    println!("Initialized allowance-cli at: {}", paths.base_dir().display());
    println!();
    print!("{}", format_settings(&settings));
    println!();
    println!("Run 'allowance purchase add <amount>' to log a purchase.");
    Ok(())
}

/// Handle `allowance config`
pub fn handle_config_command(
    paths: &AllowancePaths,
    settings: &Settings,
    cmd: Option<ConfigCommands>,
) -> AllowanceResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("allowance-cli configuration");
            println!("===========================");
            println!("Config file:    {}", paths.settings_file().display());
            println!("Purchases file: {}", paths.purchases_file().display());
            println!();
            print!("{}", format_settings(settings));
        }
        ConfigCommands::Set { key, value } => {
            let mut updated = settings.clone();
            apply_setting(&mut updated, &key, &value)?;
            updated.save(paths)?;

            info!(%key, %value, "changed setting");
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> AllowanceResult<T> {
    value.trim().parse().map_err(|_| {
        AllowanceError::Validation(format!("Invalid value for {}: '{}'", key, value))
    })
}

/// Apply a `key = value` change; the caller validates on save
pub fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> AllowanceResult<()> {
    match key.trim().to_lowercase().replace('_', "-").as_str() {
        "monthly-budget" => settings.monthly_budget = parse_value(key, value)?,
        "budget-start-day" => settings.budget_start_day = parse_value(key, value)?,
        "weekly-budget" => settings.weekly_budget = parse_value(key, value)?,
        "week-start-day" => settings.week_start_day = parse_value(key, value)?,
        "big-purchase-ratio" => settings.big_purchase_ratio = parse_value(key, value)?,
        "currency" => settings.set_currency(value),
        _ => {
            return Err(AllowanceError::Config(format!(
                "Unknown setting '{}'. Valid settings: monthly-budget, budget-start-day, \
                 weekly-budget, week-start-day, big-purchase-ratio, currency",
                key
            )))
        }
    }

    Ok(())
}

fn weekday_name(day: u32) -> &'static str {
    match day {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "?",
    }
}

fn format_settings(settings: &Settings) -> String {
    let currency = settings.currency_code.as_str();
    let mut output = String::new();

    output.push_str("Settings:\n");
    output.push_str(&format!(
        "  Weekly budget:      {}\n",
        format_currency(settings.weekly_budget, currency)
    ));
    output.push_str(&format!(
        "  Week starts on:     {}\n",
        weekday_name(settings.week_start_day)
    ));
    output.push_str(&format!(
        "  Monthly budget:     {}\n",
        format_currency(settings.monthly_budget, currency)
    ));
    output.push_str(&format!(
        "  Cycle starts on:    day {}\n",
        settings.budget_start_day
    ));
    output.push_str(&format!(
        "  Big purchase from:  {} ({:.0}% of the week)\n",
        format_currency(settings.big_purchase_threshold(), currency),
        settings.big_purchase_ratio * 100.0
    ));
    output.push_str(&format!("  Currency:           {}\n", currency));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_setting() {
        let mut settings = Settings::default();

        apply_setting(&mut settings, "weekly-budget", "250").unwrap();
        apply_setting(&mut settings, "week_start_day", "0").unwrap();
        apply_setting(&mut settings, "Currency", " eur ").unwrap();

        assert_eq!(settings.weekly_budget, 250.0);
        assert_eq!(settings.week_start_day, 0);
        assert_eq!(settings.currency_code, "EUR");
    }

    #[test]
    fn test_apply_setting_errors() {
        let mut settings = Settings::default();

        assert!(apply_setting(&mut settings, "weekly-budget", "lots").unwrap_err().is_validation());
        assert!(matches!(
            apply_setting(&mut settings, "color", "blue"),
            Err(AllowanceError::Config(_))
        ));
    }

    #[test]
    fn test_config_set_rejects_invalid_value() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        let result = handle_config_command(
            &paths,
            &settings,
            Some(ConfigCommands::Set {
                key: "budget-start-day".into(),
                value: "31".into(),
            }),
        );
        assert!(result.is_err());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_init_applies_arguments() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let args = InitArgs {
            weekly_budget: Some(1300.0),
            currency: Some("usd".into()),
            ..InitArgs::default()
        };
        handle_init_command(&paths, &Settings::default(), args).unwrap();

        let saved = Settings::load_or_create(&paths).unwrap();
        assert_eq!(saved.weekly_budget, 1300.0);
        assert_eq!(saved.currency_code, "USD");
        assert!(saved.setup_completed);
    }

    #[test]
    fn test_format_settings() {
        let output = format_settings(&Settings::default());
        assert!(output.contains("Weekly budget:      ₪100.00"));
        assert!(output.contains("Week starts on:     Monday"));
        assert!(output.contains("Big purchase from:  ₪25.00 (25% of the week)"));
    }
}
