//! CSV row reading.
//!
//! The first line names the columns. Rows are yielded lazily in file order
//! and looked up by column name.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::block::BlockFields;
use crate::error::{BlockGenError, Result};

/// Column holding the track name.
pub const TRACKNAME: &str = "Trackname";
/// Column holding the media filename.
pub const FILENAME: &str = "Filename";
/// Column holding the start timecode.
pub const TC_START: &str = "TC start";
/// Column holding the end timecode.
pub const TC_END: &str = "TC end";

/// One CSV record keyed by header name.
#[derive(Debug, Clone)]
pub struct Row {
    line: u64,
    columns: Arc<HashMap<String, usize>>,
    record: csv::StringRecord,
}

impl Row {
    /// 1-based line the record started on.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Value of a column, or `None` if the header does not name it.
    ///
    /// A record shorter than the header reads as empty for the missing
    /// trailing columns.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .get(column)
            .map(|&idx| self.record.get(idx).unwrap_or_default())
    }

    /// Value of a column the caller cannot do without.
    pub fn required(&self, column: &str) -> Result<&str> {
        self.get(column)
            .ok_or_else(|| BlockGenError::missing_field(self.line, column))
    }

    /// The four values a block is built from.
    pub fn block_fields(&self) -> Result<BlockFields> {
        Ok(BlockFields::new(
            self.required(TRACKNAME)?,
            self.required(FILENAME)?,
            self.required(TC_START)?,
            self.required(TC_END)?,
        ))
    }
}

/// Lazy reader over the records of a CSV file.
pub struct RowReader {
    path: PathBuf,
    columns: Arc<HashMap<String, usize>>,
    records: csv::StringRecordsIntoIter<File>,
}

impl RowReader {
    /// Open a CSV file and read its header line.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| BlockGenError::read(&path, e))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers().map_err(|e| BlockGenError::Csv {
            path: path.clone(),
            source: e,
        })?;

        // Duplicate header names resolve to the last occurrence.
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), idx))
            .collect::<HashMap<_, _>>();
        tracing::debug!("CSV '{}' columns: {:?}", path.display(), headers);

        Ok(Self {
            path,
            columns: Arc::new(columns),
            records: reader.into_records(),
        })
    }
}

impl Iterator for RowReader {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|record| Row {
                    line: record.position().map_or(0, |p| p.line()),
                    columns: Arc::clone(&self.columns),
                    record,
                })
                .map_err(|e| BlockGenError::Csv {
                    path: self.path.clone(),
                    source: e,
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_csv(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("tracks.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_rows_in_file_order() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "Trackname,Filename,TC start,TC end\n\
             Intro,intro.wav,00:00:00:00,00:00:10:00\n\
             Outro,outro.wav,00:01:00:00,00:01:30:00\n",
        );

        let rows: Vec<Row> = RowReader::open(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(TRACKNAME), Some("Intro"));
        assert_eq!(rows[1].get(TC_END), Some("00:01:30:00"));
        assert_eq!(rows[0].line(), 2);
        assert_eq!(rows[1].line(), 3);
    }

    #[test]
    fn column_order_does_not_matter() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "TC end,Notes,TC start,Filename,Trackname\n\
             00:00:05:00,ignored,00:00:01:00,a.wav,A\n",
        );

        let row = RowReader::open(&path).unwrap().next().unwrap().unwrap();
        let fields = row.block_fields().unwrap();
        assert_eq!(
            fields,
            BlockFields::new("A", "a.wav", "00:00:01:00", "00:00:05:00")
        );
    }

    #[test]
    fn short_records_read_as_empty() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "Trackname,Filename,TC start,TC end\nA,a.wav\n",
        );

        let row = RowReader::open(&path).unwrap().next().unwrap().unwrap();
        let fields = row.block_fields().unwrap();
        assert_eq!(fields.tc_start, "");
        assert!(!fields.is_complete());
    }

    #[test]
    fn missing_column_is_a_typed_error() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "Trackname,Filename,TC start\nA,a.wav,00:00:01:00\n");

        let row = RowReader::open(&path).unwrap().next().unwrap().unwrap();
        match row.block_fields() {
            Err(BlockGenError::MissingField { line, column }) => {
                assert_eq!(line, 2);
                assert_eq!(column, TC_END);
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn header_match_is_case_sensitive() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "trackname\nA\n");
        let row = RowReader::open(&path).unwrap().next().unwrap().unwrap();
        assert!(row.required(TRACKNAME).is_err());
        assert_eq!(row.get("trackname"), Some("A"));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "Trackname,Filename,TC start,TC end\n\"Hello, World\",hw.wav,00:00:01:00,00:00:02:00\n",
        );
        let row = RowReader::open(&path).unwrap().next().unwrap().unwrap();
        assert_eq!(row.get(TRACKNAME), Some("Hello, World"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let result = RowReader::open(dir.path().join("nope.csv"));
        assert!(matches!(result, Err(BlockGenError::ReadError { .. })));
    }
}
