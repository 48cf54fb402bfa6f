//! Purchase repository for JSON storage
//!
//! Manages loading and saving purchases to purchases.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::AllowanceError;
use crate::models::{DateRange, Purchase, PurchaseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable purchase data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PurchaseData {
    purchases: Vec<Purchase>,
}

/// Repository for purchase persistence
pub struct PurchaseRepository {
    path: PathBuf,
    data: RwLock<HashMap<PurchaseId, Purchase>>,
}

/// Newest first, ties broken by creation time
fn sort_newest_first(purchases: &mut [Purchase]) {
    purchases.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl PurchaseRepository {
    /// Create a new purchase repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<PurchaseId, Purchase>>, AllowanceError> {
        self.data
            .read()
            .map_err(|e| AllowanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<PurchaseId, Purchase>>, AllowanceError> {
        self.data
            .write()
            .map_err(|e| AllowanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load purchases from disk
    pub fn load(&self) -> Result<(), AllowanceError> {
        let file_data: PurchaseData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for purchase in file_data.purchases {
            data.insert(purchase.id, purchase);
        }

        debug!(count = data.len(), path = %self.path.display(), "loaded purchases");
        Ok(())
    }

    /// Save purchases to disk
    pub fn save(&self) -> Result<(), AllowanceError> {
        let data = self.read()?;

        let mut purchases: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut purchases);

        debug!(count = purchases.len(), path = %self.path.display(), "saving purchases");
        write_json_atomic(&self.path, &PurchaseData { purchases })
    }

    /// Get a purchase by ID
    pub fn get(&self, id: PurchaseId) -> Result<Option<Purchase>, AllowanceError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Get all purchases (deleted ones included), newest first
    pub fn get_all(&self) -> Result<Vec<Purchase>, AllowanceError> {
        let mut purchases: Vec<_> = self.read()?.values().cloned().collect();
        sort_newest_first(&mut purchases);
        Ok(purchases)
    }

    /// Get purchases dated within a range (deleted ones included), newest first
    pub fn get_by_date_range(&self, range: &DateRange) -> Result<Vec<Purchase>, AllowanceError> {
        let mut purchases: Vec<_> = self
            .read()?
            .values()
            .filter(|p| range.contains(p.date))
            .cloned()
            .collect();
        sort_newest_first(&mut purchases);
        Ok(purchases)
    }

    /// Find purchases whose ID matches a user-typed reference
    pub fn find_matching(&self, reference: &str) -> Result<Vec<Purchase>, AllowanceError> {
        Ok(self
            .read()?
            .values()
            .filter(|p| p.id.matches(reference))
            .cloned()
            .collect())
    }

    /// Insert or update a purchase
    pub fn upsert(&self, purchase: Purchase) -> Result<(), AllowanceError> {
        self.write()?.insert(purchase.id, purchase);
        Ok(())
    }

    /// Remove a purchase permanently
    pub fn delete(&self, id: PurchaseId) -> Result<bool, AllowanceError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    /// Count purchases
    pub fn count(&self) -> Result<usize, AllowanceError> {
        Ok(self.read()?.len())
    }
}
