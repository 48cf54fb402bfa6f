//! Purchase display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Purchase;

use super::format::{format_currency, truncate};
use super::strip::{BIG_ICON, SMALL_ICON};

#[derive(Tabled)]
struct PurchaseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "")]
    kind: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Render purchases as a table. Purchases at or above `big_threshold` are
/// marked with the big-purchase icon.
pub fn format_purchase_table(purchases: &[Purchase], currency_code: &str, big_threshold: f64) -> String {
    if purchases.is_empty() {
        return "No purchases found.\n".to_string();
    }

    let rows: Vec<PurchaseRow> = purchases
        .iter()
        .map(|p| PurchaseRow {
            id: p.id.to_string(),
            date: p.date.format("%Y-%m-%d").to_string(),
            kind: if p.amount >= big_threshold { BIG_ICON } else { SMALL_ICON },
            amount: format_currency(p.amount, currency_code),
            description: truncate(&p.description, 40),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format a single purchase for display
pub fn format_purchase_details(purchase: &Purchase, currency_code: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Purchase:    {}\n", purchase.id));
    output.push_str(&format!("Date:        {}\n", purchase.date.format("%Y-%m-%d (%a)")));
    output.push_str(&format!(
        "Amount:      {}\n",
        format_currency(purchase.amount, currency_code)
    ));

    if !purchase.description.is_empty() {
        output.push_str(&format!("Description: {}\n", purchase.description));
    }

    output.push_str(&format!(
        "Logged:      {}\n",
        purchase.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    if let Some(deleted_at) = purchase.deleted_at.filter(|_| purchase.deleted) {
        output.push_str(&format!(
            "In trash:    since {}\n",
            deleted_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output
}

/// One-line summary used after add/edit/delete
pub fn format_purchase_short(purchase: &Purchase, currency_code: &str) -> String {
    let mut line = format!(
        "{} {} {}",
        purchase.id,
        purchase.date.format("%Y-%m-%d"),
        format_currency(purchase.amount, currency_code)
    );

    if !purchase.description.is_empty() {
        line.push_str(&format!(" ({})", truncate(&purchase.description, 30)));
    }

    line
}
