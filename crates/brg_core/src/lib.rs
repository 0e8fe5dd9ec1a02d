//! BRG Core - block recorder generator
//!
//! Turns a CSV sheet of tracks and timecodes into the `ProjectData` XML
//! manifest read by the block recorder. The crate has no CLI of its own;
//! callers hand it already-chosen paths and call [`generate`] or
//! [`generate_xml_from_csv`].
//!
//! ```no_run
//! use std::path::Path;
//! use brg_core::config::Settings;
//!
//! let report = brg_core::generate(Path::new("tracks.csv"), None, &Settings::default())?;
//! println!("{} blocks -> {}", report.blocks_written, report.output_path.display());
//! # Ok::<(), brg_core::BlockGenError>(())
//! ```

pub mod block;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod rows;
pub mod sanitize;
pub mod timecode;
pub mod xml;

pub use error::{BlockGenError, Result};
pub use pipeline::{generate, generate_xml_from_csv, GenerateReport};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
