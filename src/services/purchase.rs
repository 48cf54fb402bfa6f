//! Purchase service
//!
//! Business logic for logging, editing, soft-deleting and restoring
//! purchases, plus CSV import and export.

use std::io::{Read, Write};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AllowanceError, AllowanceResult};
use crate::models::{DateRange, Purchase, PurchaseId};
use crate::storage::Storage;

/// Service for purchase management
pub struct PurchaseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering purchases
#[derive(Debug, Clone, Default)]
pub struct PurchaseFilter {
    /// Only purchases dated within this range
    pub range: Option<DateRange>,
    /// Include soft-deleted purchases
    pub include_deleted: bool,
    /// Maximum number of purchases to return
    pub limit: Option<usize>,
}

impl PurchaseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for logging a new purchase
#[derive(Debug, Clone)]
pub struct CreatePurchaseInput {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub imported: usize,
    /// Rejected rows as (line number, reason)
    pub skipped: Vec<(usize, String)>,
}

/// One line of a purchase CSV file
#[derive(Debug, Serialize, Deserialize)]
struct PurchaseCsvRow {
    date: String,
    amount: String,
    #[serde(default)]
    description: Option<String>,
}

/// Parse a user-entered amount ("12.50", "12,50")
pub fn parse_amount(s: &str) -> AllowanceResult<f64> {
    let normalized = s.trim().replace(',', ".");
    let amount: f64 = normalized
        .parse()
        .map_err(|_| AllowanceError::Validation(format!("Invalid amount: '{}'", s.trim())))?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(AllowanceError::Validation(format!(
            "Amount must be a non-negative number, got '{}'",
            s.trim()
        )));
    }

    Ok(amount)
}

impl<'a> PurchaseService<'a> {
    /// Create a new purchase service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Log a new purchase
    pub fn create(&self, input: CreatePurchaseInput) -> AllowanceResult<Purchase> {
        let purchase = Purchase::with_description(
            input.amount,
            input.date,
            input.description.unwrap_or_default(),
        );

        purchase
            .validate()
            .map_err(|e| AllowanceError::Validation(e.to_string()))?;

        self.storage.purchases.upsert(purchase.clone())?;
        self.storage.purchases.save()?;

        info!(id = %purchase.id, amount = purchase.amount, date = %purchase.date, "logged purchase");
        Ok(purchase)
    }

    /// Get a purchase by ID
    pub fn get(&self, id: PurchaseId) -> AllowanceResult<Purchase> {
        self.storage
            .purchases
            .get(id)?
            .ok_or_else(|| AllowanceError::purchase_not_found(id.to_string()))
    }

    /// Find a purchase by a full or abbreviated ID
    pub fn find(&self, reference: &str) -> AllowanceResult<Purchase> {
        let mut matches = self.storage.purchases.find_matching(reference)?;

        match matches.len() {
            0 => Err(AllowanceError::purchase_not_found(reference.trim())),
            1 => Ok(matches.remove(0)),
            n => Err(AllowanceError::Validation(format!(
                "'{}' matches {} purchases; use a longer ID",
                reference.trim(),
                n
            ))),
        }
    }

    /// List purchases, newest first
    pub fn list(&self, filter: PurchaseFilter) -> AllowanceResult<Vec<Purchase>> {
        let purchases = match filter.range {
            Some(range) => self.storage.purchases.get_by_date_range(&range)?,
            None => self.storage.purchases.get_all()?,
        };

        let mut purchases: Vec<_> = purchases
            .into_iter()
            .filter(|p| filter.include_deleted || p.is_active())
            .collect();

        if let Some(limit) = filter.limit {
            purchases.truncate(limit);
        }

        Ok(purchases)
    }

    /// Active purchases dated within `range`, ready for the allowance engine
    pub fn active_in_range(&self, range: &DateRange) -> AllowanceResult<Vec<Purchase>> {
        self.list(PurchaseFilter::new().range(*range))
    }

    /// Soft-deleted purchases dated within `range`, newest first
    pub fn trash(&self, range: &DateRange) -> AllowanceResult<Vec<Purchase>> {
        Ok(self
            .storage
            .purchases
            .get_by_date_range(range)?
            .into_iter()
            .filter(|p| p.deleted)
            .collect())
    }

    /// Change a purchase's amount, date or description
    pub fn update(
        &self,
        id: PurchaseId,
        amount: Option<f64>,
        date: Option<NaiveDate>,
        description: Option<&str>,
    ) -> AllowanceResult<Purchase> {
        let mut purchase = self.get(id)?;

        if purchase.deleted {
            return Err(AllowanceError::Validation(format!(
                "Purchase {} is in the trash; restore it before editing",
                id
            )));
        }

        if let Some(amount) = amount {
            purchase.amount = amount;
        }
        if let Some(date) = date {
            purchase.date = date;
        }
        if let Some(description) = description {
            purchase.description = description.trim().to_string();
        }

        purchase
            .validate()
            .map_err(|e| AllowanceError::Validation(e.to_string()))?;

        purchase.updated_at = Utc::now();
        self.storage.purchases.upsert(purchase.clone())?;
        self.storage.purchases.save()?;

        info!(id = %purchase.id, "updated purchase");
        Ok(purchase)
    }

    /// Move a purchase to the trash
    pub fn soft_delete(&self, id: PurchaseId) -> AllowanceResult<Purchase> {
        let mut purchase = self.get(id)?;
        if purchase.deleted {
            return Ok(purchase);
        }

        purchase.soft_delete();
        self.storage.purchases.upsert(purchase.clone())?;
        self.storage.purchases.save()?;

        info!(id = %purchase.id, "moved purchase to trash");
        Ok(purchase)
    }

    /// Bring a purchase back from the trash
    pub fn restore(&self, id: PurchaseId) -> AllowanceResult<Purchase> {
        let mut purchase = self.get(id)?;
        if !purchase.deleted {
            return Err(AllowanceError::Validation(format!(
                "Purchase {} is not in the trash",
                id
            )));
        }

        purchase.restore();
        self.storage.purchases.upsert(purchase.clone())?;
        self.storage.purchases.save()?;

        info!(id = %purchase.id, "restored purchase");
        Ok(purchase)
    }

    /// Permanently remove a purchase that is already in the trash
    pub fn purge(&self, id: PurchaseId) -> AllowanceResult<Purchase> {
        let purchase = self.get(id)?;
        if !purchase.deleted {
            return Err(AllowanceError::Validation(format!(
                "Purchase {} is not in the trash; delete it first",
                id
            )));
        }

        self.storage.purchases.delete(id)?;
        self.storage.purchases.save()?;

        info!(id = %purchase.id, "purged purchase");
        Ok(purchase)
    }

    /// Import purchases from CSV with a `date,amount,description` header.
    ///
    /// Rows that fail to parse or validate are skipped and reported; the rest
    /// are saved in one write.
    pub fn import_csv<R: Read>(&self, reader: R) -> AllowanceResult<ImportSummary> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut summary = ImportSummary::default();

        for (index, row) in csv_reader.deserialize::<PurchaseCsvRow>().enumerate() {
            // Header is line 1
            let line = index + 2;

            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!(line, error = %e, "skipping unreadable CSV row");
                    summary.skipped.push((line, e.to_string()));
                    continue;
                }
            };

            match Self::purchase_from_row(&row) {
                Ok(purchase) => {
                    self.storage.purchases.upsert(purchase)?;
                    summary.imported += 1;
                }
                Err(reason) => {
                    warn!(line, %reason, "skipping invalid CSV row");
                    summary.skipped.push((line, reason));
                }
            }
        }

        if summary.imported > 0 {
            self.storage.purchases.save()?;
        }

        info!(
            imported = summary.imported,
            skipped = summary.skipped.len(),
            "finished CSV import"
        );
        Ok(summary)
    }

    fn purchase_from_row(row: &PurchaseCsvRow) -> Result<Purchase, String> {
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{}'", row.date))?;
        let amount = parse_amount(&row.amount).map_err(|e| e.to_string())?;

        let purchase = Purchase::with_description(
            amount,
            date,
            row.description.clone().unwrap_or_default(),
        );
        purchase.validate().map_err(|e| e.to_string())?;
        Ok(purchase)
    }

    /// Write purchases as CSV, oldest first. Returns the number of rows.
    pub fn export_csv<W: Write>(&self, writer: W, include_deleted: bool) -> AllowanceResult<usize> {
        let mut purchases = self.list(PurchaseFilter {
            include_deleted,
            ..PurchaseFilter::default()
        })?;
        purchases.reverse();

        let mut csv_writer = csv::Writer::from_writer(writer);
        for purchase in &purchases {
            csv_writer.serialize(PurchaseCsvRow {
                date: purchase.date.format("%Y-%m-%d").to_string(),
                amount: format!("{:.2}", purchase.amount),
                description: Some(purchase.description.clone()),
            })?;
        }
        csv_writer.flush()?;

        Ok(purchases.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AllowancePaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(service: &PurchaseService, amount: f64, on: NaiveDate) -> Purchase {
        service
            .create(CreatePurchaseInput {
                amount,
                date: on,
                description: None,
            })
            .unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap(), 12.5);
        assert_eq!(parse_amount(" 7,25 ").unwrap(), 7.25);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
        assert!(parse_amount("-3").unwrap_err().is_validation());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_create_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PurchaseService::new(&storage);

        let purchase = service
            .create(CreatePurchaseInput {
                amount: 18.0,
                date: date(2024, 3, 15),
                description: Some(" groceries ".into()),
            })
            .unwrap();

        let found = service.find(&purchase.id.to_string()).unwrap();
        assert_eq!(found.description, "groceries");
        assert!(service.find("pur-zzzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_rejects_negative_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PurchaseService::new(&storage);

        let result = service.create(CreatePurchaseInput {
            amount: -1.0,
            date: date(2024, 3, 15),
            description: None,
        });
        assert!(result.unwrap_err().is_validation());
        assert_eq!(storage.purchases.count().unwrap(), 0);
    }

    #[test]
    fn test_soft_delete_hides_from_active_list() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PurchaseService::new(&storage);

        let kept = log(&service, 10.0, date(2024, 3, 12));
        let removed = log(&service, 20.0, date(2024, 3, 13));
        service.soft_delete(removed.id).unwrap();

        let week = DateRange::new(date(2024, 3, 11), date(2024, 3, 17));
        let active = service.active_in_range(&week).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.id);

        let trash = service.trash(&week).unwrap();
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].id, removed.id);

        let everything = service.list(PurchaseFilter::new().include_deleted()).unwrap();
        assert_eq!(everything.len(), 2);
    }

    #[test]
    fn test_restore() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PurchaseService::new(&storage);

        let purchase = log(&service, 10.0, date(2024, 3, 12));
        assert!(service.restore(purchase.id).unwrap_err().is_validation());

        service.soft_delete(purchase.id).unwrap();
        let restored = service.restore(purchase.id).unwrap();
        assert!(restored.is_active());
    }

    #[test]
    fn test_purge_only_from_trash() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PurchaseService::new(&storage);

        let purchase = log(&service, 10.0, date(2024, 3, 12));
        assert!(service.purge(purchase.id).unwrap_err().is_validation());
        assert_eq!(storage.purchases.count().unwrap(), 1);

        service.soft_delete(purchase.id).unwrap();
        let purged = service.purge(purchase.id).unwrap();
        assert_eq!(purged.id, purchase.id);
        assert_eq!(storage.purchases.count().unwrap(), 0);
        assert!(service.get(purchase.id).unwrap_err().is_not_found());

        // Survives a reload from disk
        let mut reloaded = Storage::new(storage.paths().clone()).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.purchases.count().unwrap(), 0);
    }

    #[test]
    fn test_update() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PurchaseService::new(&storage);

        let purchase = log(&service, 10.0, date(2024, 3, 12));
        let updated = service
            .update(purchase.id, Some(11.5), Some(date(2024, 3, 10)), Some("bus"))
            .unwrap();

        assert_eq!(updated.amount, 11.5);
        assert_eq!(updated.date, date(2024, 3, 10));
        assert_eq!(updated.description, "bus");

        service.soft_delete(purchase.id).unwrap();
        assert!(service.update(purchase.id, Some(1.0), None, None).is_err());
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PurchaseService::new(&storage);

        log(&service, 1.0, date(2024, 3, 1));
        log(&service, 2.0, date(2024, 3, 3));
        log(&service, 3.0, date(2024, 3, 2));

        let listed = service.list(PurchaseFilter::new().limit(2)).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].amount, 2.0);
        assert_eq!(listed[1].amount, 3.0);
    }

    #[test]
    fn test_import_csv_skips_bad_rows() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PurchaseService::new(&storage);

        let csv_data = "date,amount,description\n\
                        2024-03-11,12.50,coffee\n\
                        2024-13-01,4.00,bad date\n\
                        2024-03-12,-3,negative\n\
                        2024-03-13,40,\n";

        let summary = service.import_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped.len(), 2);
        assert_eq!(summary.skipped[0].0, 3);
        assert_eq!(summary.skipped[1].0, 4);
        assert_eq!(storage.purchases.count().unwrap(), 2);
    }

    #[test]
    fn test_export_csv() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PurchaseService::new(&storage);

        log(&service, 12.5, date(2024, 3, 12));
        let removed = log(&service, 3.0, date(2024, 3, 11));
        service.soft_delete(removed.id).unwrap();

        let mut out = Vec::new();
        let rows = service.export_csv(&mut out, false).unwrap();
        assert_eq!(rows, 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("date,amount,description\n"));
        assert!(text.contains("2024-03-12,12.50,"));
        assert!(!text.contains("2024-03-11"));
    }
}
