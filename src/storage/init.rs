//! Storage initialization
//!
//! First-run setup: directories, an empty purchase file and saved settings.

use tracing::info;

use crate::config::paths::AllowancePaths;
use crate::config::settings::Settings;
use crate::error::AllowanceError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation.
///
/// Existing purchases are never overwritten; settings are validated and
/// saved every time so `init` can also be used to reconfigure.
pub fn initialize_storage(paths: &AllowancePaths, settings: &Settings) -> Result<(), AllowanceError> {
    settings.validate()?;
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        write_json_atomic(
            paths.purchases_file(),
            &serde_json::json!({ "purchases": [] }),
        )?;
        info!(path = %paths.purchases_file().display(), "created purchase store");
    }

    let mut settings = settings.clone();
    settings.setup_completed = true;
    settings.save(paths)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &AllowancePaths) -> bool {
    !paths.purchases_file().exists()
}
