//! Display formatting for terminal output
//!
//! Amount and date formatting, purchase tables, and the weekly icon strip.

pub mod format;
pub mod purchase;
pub mod strip;

pub use format::{format_currency, format_range, format_week_range_human};
pub use purchase::{format_purchase_details, format_purchase_short, format_purchase_table};
pub use strip::{format_status_line, render_icon_strip};
