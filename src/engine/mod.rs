//! Allowance engine
//!
//! Pure functions over dates and numbers: no I/O, no clock reads, no state
//! kept between calls. "Today" is always passed in by the caller.
//!
//! - [`cycle`]: the monthly cycle containing a day
//! - [`week`]: the budget week containing a day
//! - [`allowance`]: pro-rated allowance as of a day
//! - [`spend`]: spend totals and big/small split over a range
//! - [`icons`]: the ten-slot weekly progress strip

pub mod allowance;
pub mod calendar;
pub mod cycle;
pub mod icons;
pub mod spend;
pub mod week;

pub use allowance::{
    monthly_allowance, net_allowance, project_allowance, weekly_allowance, AllowanceProjection,
};
pub use cycle::resolve_monthly_cycle;
pub use icons::{derive_icon_layout, IconLayout};
pub use spend::{sum_detailed, sum_in_range, SpendAggregate, SpendRecord};
pub use week::resolve_week;
