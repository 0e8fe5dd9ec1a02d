//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::{MalformedDocumentPolicy, RowErrorPolicy, SchemaMode};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Block generation behavior.
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Default locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Output document used when the caller does not name one.
    #[serde(default = "default_output")]
    pub default_output: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_output() -> String {
    "output.xml".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            default_output: default_output(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Block generation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Output document layout.
    #[serde(default)]
    pub schema: SchemaMode,

    /// Reduce titles and filenames to ASCII identifiers.
    #[serde(default = "default_true")]
    pub sanitize: bool,

    /// Handling of rows with a missing column or bad timecode.
    #[serde(default)]
    pub row_errors: RowErrorPolicy,

    /// Handling of an existing output file that is not well-formed.
    #[serde(default)]
    pub malformed_document: MalformedDocumentPolicy,
}

fn default_true() -> bool {
    true
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            schema: SchemaMode::default(),
            sanitize: true,
            row_errors: RowErrorPolicy::default(),
            malformed_document: MalformedDocumentPolicy::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Also write a daily log file into `paths.logs_folder`.
    #[serde(default)]
    pub log_to_file: bool,
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Pipeline,
    Logging,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 3] = [
        ConfigSection::Paths,
        ConfigSection::Pipeline,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Pipeline => "pipeline",
            ConfigSection::Logging => "logging",
        }
    }
}
