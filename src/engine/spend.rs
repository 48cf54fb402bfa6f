//! Spend aggregation over date ranges
//!
//! Callers pass purchases that are already filtered down to active records;
//! nothing here looks at soft-delete flags.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Purchase;

/// A dated amount of spending
pub trait SpendRecord {
    fn amount(&self) -> f64;
    fn date(&self) -> NaiveDate;
}

impl SpendRecord for Purchase {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl<T: SpendRecord + ?Sized> SpendRecord for &T {
    fn amount(&self) -> f64 {
        (**self).amount()
    }

    fn date(&self) -> NaiveDate {
        (**self).date()
    }
}

impl SpendRecord for (NaiveDate, f64) {
    fn amount(&self) -> f64 {
        self.1
    }

    fn date(&self) -> NaiveDate {
        self.0
    }
}

/// Spend within a range, split into big and small purchases
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpendAggregate {
    pub total: f64,
    pub big_total: f64,
    pub small_total: f64,
    pub big_count: usize,
    pub small_count: usize,
}

impl SpendAggregate {
    /// Number of purchases counted
    pub fn count(&self) -> usize {
        self.big_count + self.small_count
    }
}

// NaN amounts count as nothing spent
fn usable_amount<R: SpendRecord>(record: &R) -> f64 {
    let amount = record.amount();
    if amount.is_nan() {
        0.0
    } else {
        amount
    }
}

fn in_range<R: SpendRecord>(record: &R, start: NaiveDate, end: NaiveDate) -> bool {
    let date = record.date();
    date >= start && date <= end
}

/// Total amount of purchases dated within `[start, end]`, by calendar day
pub fn sum_in_range<R: SpendRecord>(purchases: &[R], start: NaiveDate, end: NaiveDate) -> f64 {
    purchases
        .iter()
        .filter(|p| in_range(*p, start, end))
        .map(usable_amount)
        .fold(0.0, |sum, amount| sum + amount)
}

/// Like [`sum_in_range`], but also splits the purchases into big
/// (`amount >= big_threshold`) and small ones.
pub fn sum_detailed<R: SpendRecord>(
    purchases: &[R],
    start: NaiveDate,
    end: NaiveDate,
    big_threshold: f64,
) -> SpendAggregate {
    let mut aggregate = SpendAggregate::default();

    for purchase in purchases.iter().filter(|p| in_range(*p, start, end)) {
        let amount = usable_amount(purchase);
        if amount >= big_threshold {
            aggregate.big_total += amount;
            aggregate.big_count += 1;
        } else {
            aggregate.small_total += amount;
            aggregate.small_count += 1;
        }
    }

    aggregate.total = aggregate.big_total + aggregate.small_total;
    aggregate
}
