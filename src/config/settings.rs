//! User settings for allowance-cli
//!
//! Holds the budget parameters the allowance engine is driven by: the monthly
//! budget and the day its cycle starts, the weekly budget and the weekday its
//! week starts, and the ratio that defines a "big" purchase.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::AllowancePaths;
use crate::error::AllowanceError;

/// Highest accepted cycle start day; later days do not exist in every month
pub const MAX_BUDGET_START_DAY: u32 = 28;

/// User settings for allowance-cli
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Amount allocated per monthly cycle
    #[serde(default = "default_monthly_budget")]
    pub monthly_budget: f64,

    /// Day of month the monthly cycle starts on (1-28)
    #[serde(default = "default_budget_start_day")]
    pub budget_start_day: u32,

    /// Amount allocated per week
    #[serde(default = "default_weekly_budget")]
    pub weekly_budget: f64,

    /// First day of the budget week (0 = Sunday .. 6 = Saturday)
    #[serde(default = "default_week_start_day")]
    pub week_start_day: u32,

    /// Share of the weekly budget at or above which a purchase counts as big
    #[serde(default = "default_big_purchase_ratio")]
    pub big_purchase_ratio: f64,

    /// ISO 4217 currency code, e.g. "USD", "EUR", "ILS"
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Whether `allowance init` has been run
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_monthly_budget() -> f64 {
    40.0
}

fn default_budget_start_day() -> u32 {
    1
}

fn default_weekly_budget() -> f64 {
    100.0
}

fn default_week_start_day() -> u32 {
    1 // Monday
}

fn default_big_purchase_ratio() -> f64 {
    0.25
}

fn default_currency_code() -> String {
    "ILS".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            monthly_budget: default_monthly_budget(),
            budget_start_day: default_budget_start_day(),
            weekly_budget: default_weekly_budget(),
            week_start_day: default_week_start_day(),
            big_purchase_ratio: default_big_purchase_ratio(),
            currency_code: default_currency_code(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &AllowancePaths) -> Result<Self, AllowanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                AllowanceError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AllowanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Validate and save settings to disk
    pub fn save(&self, paths: &AllowancePaths) -> Result<(), AllowanceError> {
        self.validate()?;
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AllowanceError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            AllowanceError::Io(format!("Failed to write settings file: {}", e))
        })?;

        debug!(path = %settings_path.display(), "saved settings");
        Ok(())
    }

    /// Check that every budget parameter is usable by the engine
    pub fn validate(&self) -> Result<(), AllowanceError> {
        if !(1..=MAX_BUDGET_START_DAY).contains(&self.budget_start_day) {
            return Err(AllowanceError::Validation(format!(
                "Budget start day must be between 1 and {}, got {}",
                MAX_BUDGET_START_DAY, self.budget_start_day
            )));
        }

        if self.week_start_day > 6 {
            return Err(AllowanceError::Validation(format!(
                "Week start day must be between 0 (Sunday) and 6 (Saturday), got {}",
                self.week_start_day
            )));
        }

        if !self.weekly_budget.is_finite() || self.weekly_budget <= 0.0 {
            return Err(AllowanceError::Validation(format!(
                "Weekly budget must be a positive number, got {}",
                self.weekly_budget
            )));
        }

        if !self.monthly_budget.is_finite() || self.monthly_budget < 0.0 {
            return Err(AllowanceError::Validation(format!(
                "Monthly budget must be zero or positive, got {}",
                self.monthly_budget
            )));
        }

        if !self.big_purchase_ratio.is_finite()
            || self.big_purchase_ratio <= 0.0
            || self.big_purchase_ratio > 1.0
        {
            return Err(AllowanceError::Validation(format!(
                "Big purchase ratio must be in (0, 1], got {}",
                self.big_purchase_ratio
            )));
        }

        if self.currency_code.trim().is_empty() {
            return Err(AllowanceError::Validation(
                "Currency code cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Set the currency code, normalized to upper case
    pub fn set_currency(&mut self, code: &str) {
        self.currency_code = code.trim().to_uppercase();
    }

    /// Amount at or above which a purchase is classified as big this week
    pub fn big_purchase_threshold(&self) -> f64 {
        self.weekly_budget * self.big_purchase_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.budget_start_day, 1);
        assert_eq!(settings.week_start_day, 1);
        assert_eq!(settings.currency_code, "ILS");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.weekly_budget = 1300.0;
        settings.week_start_day = 0;
        settings.setup_completed = true;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"weekly_budget": 250.0}"#).unwrap();
        assert_eq!(loaded.weekly_budget, 250.0);
        assert_eq!(loaded.monthly_budget, 40.0);
        assert_eq!(loaded.big_purchase_ratio, 0.25);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.budget_start_day = 29;
        assert!(settings.validate().unwrap_err().is_validation());

        let mut settings = Settings::default();
        settings.week_start_day = 7;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.weekly_budget = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.monthly_budget = f64::NAN;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.set_currency("  ");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_save_refuses_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.budget_start_day = 0;

        assert!(settings.save(&paths).is_err());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_big_purchase_threshold() {
        let mut settings = Settings::default();
        settings.weekly_budget = 1300.0;
        assert_eq!(settings.big_purchase_threshold(), 325.0);
    }

    #[test]
    fn test_set_currency_uppercases() {
        let mut settings = Settings::default();
        settings.set_currency(" eur ");
        assert_eq!(settings.currency_code, "EUR");
    }
}
