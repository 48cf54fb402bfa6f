//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod purchase;
pub mod report;

pub use config::{handle_config_command, handle_init_command, ConfigCommands, InitArgs};
pub use purchase::{handle_purchase_command, PurchaseCommands};
pub use report::{handle_details_command, handle_summary_command};
