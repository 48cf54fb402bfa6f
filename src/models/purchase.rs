//! Purchase model
//!
//! A purchase is an amount of money spent on a calendar day. Deleting a
//! purchase only flags it, so it can be restored from the trash.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::PurchaseId;

/// Maximum length of a purchase description
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// A logged purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// Unique identifier
    pub id: PurchaseId,

    /// Amount spent, in the configured currency
    pub amount: f64,

    /// Day the spend is attributed to (not when it was recorded)
    pub date: NaiveDate,

    /// Free-form note
    #[serde(default)]
    pub description: String,

    /// Soft-delete flag
    #[serde(default)]
    pub deleted: bool,

    /// When the purchase was soft-deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    /// When the purchase was created
    pub created_at: DateTime<Utc>,

    /// When the purchase was last modified
    pub updated_at: DateTime<Utc>,
}

impl Purchase {
    /// Create a new purchase
    pub fn new(amount: f64, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: PurchaseId::new(),
            amount,
            date,
            description: String::new(),
            deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new purchase with a description
    pub fn with_description(amount: f64, date: NaiveDate, description: impl Into<String>) -> Self {
        let mut purchase = Self::new(amount, date);
        purchase.description = description.into().trim().to_string();
        purchase
    }

    /// Flag the purchase as deleted
    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted = true;
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Bring a deleted purchase back
    pub fn restore(&mut self) {
        self.deleted = false;
        self.deleted_at = None;
        self.updated_at = Utc::now();
    }

    /// Whether the purchase still counts toward spending
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    /// Validate the purchase
    pub fn validate(&self) -> Result<(), PurchaseValidationError> {
        if !self.amount.is_finite() {
            return Err(PurchaseValidationError::NonFiniteAmount);
        }

        if self.amount < 0.0 {
            return Err(PurchaseValidationError::NegativeAmount(self.amount));
        }

        if self.description.len() > MAX_DESCRIPTION_LEN {
            return Err(PurchaseValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }

        Ok(())
    }
}

/// Validation errors for purchases
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseValidationError {
    NonFiniteAmount,
    NegativeAmount(f64),
    DescriptionTooLong(usize),
}

impl std::fmt::Display for PurchaseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteAmount => write!(f, "Purchase amount must be a number"),
            Self::NegativeAmount(amount) => {
                write!(f, "Purchase amount cannot be negative: {}", amount)
            }
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description too long ({} characters, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for PurchaseValidationError {}
