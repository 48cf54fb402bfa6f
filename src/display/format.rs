//! Formatting helpers for amounts and dates

use chrono::Datelike;

use crate::models::DateRange;

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "ILS" => Some("₪"),
        "RUB" => Some("₽"),
        "JPY" | "CNY" => Some("¥"),
        _ => None,
    }
}

/// Format an amount in the given ISO currency, with two decimals.
///
/// Known currencies get their symbol as a prefix (`₪12.50`, `-$3.00`);
/// anything else falls back to `12.50 CHF`.
pub fn format_currency(amount: f64, currency_code: &str) -> String {
    let code = currency_code.trim().to_uppercase();

    match currency_symbol(&code) {
        Some(symbol) => {
            let sign = if amount < 0.0 { "-" } else { "" };
            format!("{}{}{:.2}", sign, symbol, amount.abs())
        }
        None => format!("{:.2} {}", amount, code),
    }
}

/// Human week title: "11-17 March" within one month, "26 Feb - 3 Mar" across two
pub fn format_week_range_human(range: &DateRange) -> String {
    let (start, end) = (range.start, range.end);

    if start.year() == end.year() && start.month() == end.month() {
        format!("{}-{} {}", start.day(), end.day(), end.format("%B"))
    } else {
        format!("{} - {}", start.format("%-d %b"), end.format("%-d %b"))
    }
}

/// "2024-03-10 .. 2024-04-09"
pub fn format_range(range: &DateRange) -> String {
    format!(
        "{} .. {}",
        range.start.format("%Y-%m-%d"),
        range.end.format("%Y-%m-%d")
    )
}

/// Pick the singular or plural form of a word
pub fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Truncate a string to `max_len` characters, ending with "..." when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }

    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{}...", kept)
}
