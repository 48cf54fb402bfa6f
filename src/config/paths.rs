//! Path management for allowance-cli
//!
//! ## Path Resolution Order
//!
//! 1. `ALLOWANCE_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME` or `~/.config` on
//!    Unix, `%APPDATA%` on Windows) joined with `allowance-cli`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::AllowanceError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "ALLOWANCE_CLI_DATA_DIR";

/// Manages all paths used by allowance-cli
#[derive(Debug, Clone)]
pub struct AllowancePaths {
    base_dir: PathBuf,
}

impl AllowancePaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, AllowanceError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create AllowancePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to purchases.json
    pub fn purchases_file(&self) -> PathBuf {
        self.data_dir().join("purchases.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), AllowanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AllowanceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AllowanceError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if `allowance init` has run.
    ///
    /// `config set` can write the settings file on its own, so the purchase
    /// store created by init must exist too.
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists() && self.purchases_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, AllowanceError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| AllowanceError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("allowance-cli"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_settings_file_alone_is_not_initialized() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        std::fs::write(paths.settings_file(), "{}").unwrap();
        assert!(!paths.is_initialized());

        std::fs::write(paths.purchases_file(), r#"{"purchases": []}"#).unwrap();
        assert!(paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.purchases_file(),
            temp_dir.path().join("data").join("purchases.json")
        );
    }
}
