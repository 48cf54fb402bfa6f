//! Storage layer for allowance-cli
//!
//! JSON file storage with atomic writes and automatic directory creation.

pub mod file_io;
pub mod init;
pub mod purchases;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use purchases::PurchaseRepository;

use crate::config::paths::AllowancePaths;
use crate::error::AllowanceError;

/// Storage coordinator that owns the repositories
pub struct Storage {
    paths: AllowancePaths,
    pub purchases: PurchaseRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: AllowancePaths) -> Result<Self, AllowanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            purchases: PurchaseRepository::new(paths.purchases_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &AllowancePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), AllowanceError> {
        self.purchases.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), AllowanceError> {
        self.purchases.save()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
