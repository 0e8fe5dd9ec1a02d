//! End-to-end generation: CSV sheet in, block document out.
//!
//! The whole document is assembled in memory and written once at the end,
//! so a run that fails part-way never leaves a partial output file.

use std::path::{Path, PathBuf};

use crate::block::{BlockBuilder, RangeEnd};
use crate::config::{PipelineSettings, Settings};
use crate::document::{prepare_document, DocumentOrigin};
use crate::error::{BlockGenError, Result};
use crate::models::RowErrorPolicy;
use crate::rows::RowReader;
use crate::xml::write_document;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Where the document was written. Differs from the requested path
    /// when the existing file was redirected.
    pub output_path: PathBuf,
    /// Blocks written, one per usable row.
    pub blocks_written: usize,
    /// Rows dropped because a required field was empty.
    pub rows_skipped: usize,
    /// Rows dropped because of a row error under `RowErrorPolicy::Skip`.
    pub rows_rejected: usize,
    pub origin: DocumentOrigin,
}

/// Generate or update the document at `output_path` from `csv_path`.
pub fn generate_xml_from_csv(
    csv_path: &Path,
    output_path: &Path,
    settings: &PipelineSettings,
) -> Result<GenerateReport> {
    let rows = RowReader::open(csv_path)?;
    let mut document = prepare_document(output_path, settings)?;
    let builder = BlockBuilder::new(settings.sanitize);

    let mut rows_skipped = 0;
    let mut rows_rejected = 0;

    for row in rows {
        let row = row?;
        let line = row.line();

        let built = row.block_fields().and_then(|fields| {
            if !fields.is_complete() {
                return Ok(None);
            }
            builder.build(&fields).map(Some).map_err(|e| {
                let value = match e.end {
                    RangeEnd::Start => fields.tc_start.clone(),
                    RangeEnd::End => fields.tc_end.clone(),
                };
                BlockGenError::invalid_timecode(line, value, e.source)
            })
        });

        match built {
            Ok(Some(block)) => {
                tracing::debug!("Line {}: block {} '{}'", line, block.id, block.title);
                document.push_block(block.to_element());
            }
            Ok(None) => rows_skipped += 1,
            Err(e) if e.is_row_error() && settings.row_errors == RowErrorPolicy::Skip => {
                tracing::warn!("Skipping row: {}", e);
                rows_rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let blocks_written = document.block_count();
    write_document(&mut document.root, &document.output_path)
        .map_err(|e| BlockGenError::write(&document.output_path, e))?;

    tracing::info!(
        "XML file generated or updated: {}",
        document.output_path.display()
    );
    if rows_skipped > 0 || rows_rejected > 0 {
        tracing::debug!(
            "{} blocks written, {} incomplete rows skipped, {} rows rejected",
            blocks_written,
            rows_skipped,
            rows_rejected
        );
    }

    Ok(GenerateReport {
        output_path: document.output_path,
        blocks_written,
        rows_skipped,
        rows_rejected,
        origin: document.origin,
    })
}

/// Run a generation the way a command-line caller would.
///
/// `input` must exist. `output` defaults to `paths.default_output` from
/// the settings.
pub fn generate(input: &Path, output: Option<&Path>, settings: &Settings) -> Result<GenerateReport> {
    if !input.is_file() {
        return Err(BlockGenError::MissingInputFile(input.to_path_buf()));
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&settings.paths.default_output));

    generate_xml_from_csv(input, &output, &settings.pipeline)
}
