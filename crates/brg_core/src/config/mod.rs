//! Configuration management for the block generator.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use brg_core::config::{ConfigManager, ConfigSection};
//! use brg_core::models::RowErrorPolicy;
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Default output: {}", config.settings().paths.default_output);
//!
//! // Modify a setting
//! config.settings_mut().pipeline.row_errors = RowErrorPolicy::Skip;
//!
//! // Save just the pipeline section atomically
//! config.update_section(ConfigSection::Pipeline).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, LoggingSettings, PathSettings, PipelineSettings, Settings};
