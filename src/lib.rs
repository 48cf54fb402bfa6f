//! allowance-cli - Terminal-based rolling allowance tracker
//!
//! This library computes how much of a monthly and a weekly budget is
//! available on a given day, given the purchases logged so far. Budgets are
//! spread evenly over the days of a cycle, so an allowance builds up day by
//! day instead of being available all at once.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `engine`: Pure cycle, week, allowance, spend and icon-strip computations
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Purchases, IDs and date ranges
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Dashboard and weekly details
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use allowance::engine::monthly_allowance;
//!
//! let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let projection = monthly_allowance(today, 10, 300.0);
//! println!("available: {:.2}", projection.net_of(42.0));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{AllowanceError, AllowanceResult};
