//! Icon layout for the weekly progress strip
//!
//! The weekly budget is drawn as ten slots. Used slots are split between big
//! and small purchases in proportion to their share of the spend; anything
//! spent beyond the budget is drawn as warning icons, one per 10% over.

use serde::Serialize;

/// Slots in the base progress strip
pub const TOTAL_ICONS: u32 = 10;

/// Warning icons that fit on the same row as the strip
pub const FIRST_ROW_WARNINGS: u32 = 2;

/// Warning icons per additional row
pub const WARNING_ROW_WIDTH: u32 = 12;

/// How the weekly strip is filled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconLayout {
    pub total_icons: u32,
    pub used_icons: u32,
    pub big_icons: u32,
    pub small_icons: u32,
    pub empty_icons: u32,
    pub warning_icons_total: u32,
    pub first_row_warnings: u32,
    /// Warning icons on each row after the first
    pub warning_rows: Vec<u32>,
}

/// Derive the strip for a week's spend.
///
/// `spent` should be `big_total + small_total`. The rounding and the
/// order of the fallbacks that keep small spend visible are fixed: moving
/// any of them changes the output on boundary cases.
pub fn derive_icon_layout(spent: f64, budget: f64, big_total: f64, small_total: f64) -> IconLayout {
    let used_ratio = (spent / budget.max(1.0)).clamp(0.0, 1.0);
    let mut used_icons = round_icons(used_ratio * TOTAL_ICONS as f64);

    let mut big_icons = 0;
    let mut small_icons = 0;
    if spent > 0.0 {
        // Minor spend still gets one slot
        if small_total > 0.0 && used_icons == 0 {
            used_icons = 1;
        }

        let big_share = big_total / spent;
        big_icons = round_icons(used_icons as f64 * big_share);
        small_icons = used_icons.saturating_sub(big_icons);

        if small_total > 0.0 && small_icons == 0 {
            if big_icons > 0 {
                big_icons -= 1;
                small_icons = 1;
            } else if used_icons < TOTAL_ICONS {
                used_icons += 1;
                small_icons = 1;
            } else {
                small_icons = 1;
                big_icons = used_icons.saturating_sub(small_icons);
            }
        }
    }

    let empty_icons = TOTAL_ICONS.saturating_sub(used_icons);

    let overspend = (spent - budget).max(0.0);
    let warning_icons_total = if overspend > 0.0 {
        (overspend / budget.max(1.0) * 10.0).ceil() as u32
    } else {
        0
    };
    let (first_row_warnings, warning_rows) = split_warning_rows(warning_icons_total);

    IconLayout {
        total_icons: TOTAL_ICONS,
        used_icons,
        big_icons,
        small_icons,
        empty_icons,
        warning_icons_total,
        first_row_warnings,
        warning_rows,
    }
}

// Inputs are non-negative, where half-away-from-zero equals half-up
fn round_icons(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.round() as u32
    }
}

fn split_warning_rows(total: u32) -> (u32, Vec<u32>) {
    let first = total.min(FIRST_ROW_WARNINGS);
    let mut rows = Vec::new();
    let mut remaining = total - first;
    while remaining > 0 {
        let row = remaining.min(WARNING_ROW_WIDTH);
        rows.push(row);
        remaining -= row;
    }
    (first, rows)
}
