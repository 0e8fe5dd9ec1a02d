//! Error types for block generation.
//!
//! Every failure the pipeline can hit is a variant here. Rows with an
//! empty required field are not errors; they are skipped silently.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::timecode::TimecodeError;

/// Errors that can occur while turning a CSV sheet into a block document.
#[derive(Error, Debug)]
pub enum BlockGenError {
    /// The input CSV does not exist.
    #[error("The file '{}' does not exist", .0.display())]
    MissingInputFile(PathBuf),

    /// A file could not be opened or read.
    #[error("Failed to read file '{}': {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("Failed to read CSV '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row does not carry a column the pipeline needs.
    #[error("Row at line {line} has no '{column}' column")]
    MissingField { line: u64, column: String },

    /// A timecode could not be interpreted.
    #[error("Invalid timecode '{value}' at line {line}: {source}")]
    InvalidTimecode {
        line: u64,
        value: String,
        #[source]
        source: TimecodeError,
    },

    /// The existing output document is not well-formed XML.
    #[error("Existing document '{}' is not well-formed: {message}", path.display())]
    MalformedDocument { path: PathBuf, message: String },

    /// The output document could not be written.
    #[error("Failed to write file '{}': {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration could not be loaded or saved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BlockGenError {
    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Create a missing column error.
    pub fn missing_field(line: u64, column: impl Into<String>) -> Self {
        Self::MissingField {
            line,
            column: column.into(),
        }
    }

    /// Create an invalid timecode error.
    pub fn invalid_timecode(line: u64, value: impl Into<String>, source: TimecodeError) -> Self {
        Self::InvalidTimecode {
            line,
            value: value.into(),
            source,
        }
    }

    /// Whether this error belongs to a single row rather than the whole run.
    ///
    /// Row-level errors are the ones a `RowErrorPolicy::Skip` run may step over.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::InvalidTimecode { .. }
        )
    }
}

/// Result type for block generation.
pub type Result<T> = std::result::Result<T, BlockGenError>;
