//! Service layer for allowance-cli
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and the lookups the reports are built from.

pub mod period;
pub mod purchase;

pub use period::PeriodService;
pub use purchase::{parse_amount, CreatePurchaseInput, ImportSummary, PurchaseFilter, PurchaseService};
