//! Weekly progress strip and status line

use crate::engine::{IconLayout, SpendAggregate};

use super::format::{format_currency, plural};

pub const BIG_ICON: &str = "🌚";
pub const SMALL_ICON: &str = "🌝";
pub const EMPTY_ICON: &str = "▫";
pub const WARNING_ICON: &str = "😈";

/// Render the strip as lines: the ten base slots plus the first warnings on
/// the first line, then one line per further warning row.
pub fn render_icon_strip(layout: &IconLayout) -> Vec<String> {
    let mut first = String::new();
    first.push_str(&BIG_ICON.repeat(layout.big_icons as usize));
    first.push_str(&SMALL_ICON.repeat(layout.small_icons as usize));
    first.push_str(&EMPTY_ICON.repeat(layout.empty_icons as usize));
    first.push_str(&WARNING_ICON.repeat(layout.first_row_warnings as usize));

    let mut lines = vec![first];
    lines.extend(
        layout
            .warning_rows
            .iter()
            .map(|&count| WARNING_ICON.repeat(count as usize)),
    );
    lines
}

/// "2 big (🌚) + 1 small (🌝) purchases — ₪40.00 left"
pub fn format_status_line(aggregate: &SpendAggregate, weekly_left: f64, currency_code: &str) -> String {
    let tail = if weekly_left >= 0.0 {
        format!("{} left", format_currency(weekly_left, currency_code))
    } else {
        format!("{} over budget", format_currency(weekly_left.abs(), currency_code))
    };

    format!(
        "{} big ({}) + {} small ({}) {} — {}",
        aggregate.big_count,
        BIG_ICON,
        aggregate.small_count,
        SMALL_ICON,
        plural(aggregate.count(), "purchase", "purchases"),
        tail
    )
}
