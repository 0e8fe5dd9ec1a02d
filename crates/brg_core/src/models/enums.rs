//! Core enums used throughout the pipeline.

use serde::{Deserialize, Serialize};

/// Layout of the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaMode {
    /// `<ProjectData><blocks><Block/>...</blocks></ProjectData>`, merged
    /// into an existing document when one is present.
    #[default]
    ProjectData,
    /// `<Root><Block/>...</Root>`, always written fresh.
    LegacyRoot,
}

impl SchemaMode {
    /// Tag of the document root for this layout.
    pub fn root_tag(&self) -> &'static str {
        match self {
            SchemaMode::ProjectData => "ProjectData",
            SchemaMode::LegacyRoot => "Root",
        }
    }
}

impl std::fmt::Display for SchemaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaMode::ProjectData => write!(f, "ProjectData"),
            SchemaMode::LegacyRoot => write!(f, "Legacy Root"),
        }
    }
}

/// What to do when a single row has a missing column or a bad timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowErrorPolicy {
    /// Fail the whole run; nothing is written.
    #[default]
    Abort,
    /// Log a warning, drop the row and carry on.
    Skip,
}

impl std::fmt::Display for RowErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowErrorPolicy::Abort => write!(f, "abort"),
            RowErrorPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// What to do when the existing output file is not well-formed XML.
///
/// A well-formed document with the wrong root tag is always redirected;
/// this only governs documents that fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedDocumentPolicy {
    /// Fail with a parse error.
    #[default]
    Abort,
    /// Treat it like a wrong root tag: leave it alone and write to a
    /// timestamped sibling file instead.
    Redirect,
}

impl std::fmt::Display for MalformedDocumentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedDocumentPolicy::Abort => write!(f, "abort"),
            MalformedDocumentPolicy::Redirect => write!(f, "redirect"),
        }
    }
}
