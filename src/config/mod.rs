//! Configuration module for allowance-cli
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - Budget settings persistence and validation

pub mod paths;
pub mod settings;

pub use paths::AllowancePaths;
pub use settings::Settings;
