//! Core data models for allowance-cli
//!
//! Purchases are the only persisted entity; date ranges describe the monthly
//! cycles and budget weeks the engine works over.

pub mod ids;
pub mod purchase;
pub mod range;

pub use ids::PurchaseId;
pub use purchase::{Purchase, PurchaseValidationError};
pub use range::{DateRange, RangeParseError};
