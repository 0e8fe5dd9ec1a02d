//! Block construction.
//!
//! One block per usable CSV row. A block carries a fresh v4 UUID, the
//! parsed timecode range, and the row's title and filename.

use uuid::Uuid;

use crate::sanitize::sanitize;
use crate::timecode::{display_fields, Timecode, TimecodeError};
use crate::xml::Element;

/// The four row values a block is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockFields {
    pub trackname: String,
    pub filename: String,
    pub tc_start: String,
    pub tc_end: String,
}

impl BlockFields {
    /// Create block fields from the four row values.
    pub fn new(
        trackname: impl Into<String>,
        filename: impl Into<String>,
        tc_start: impl Into<String>,
        tc_end: impl Into<String>,
    ) -> Self {
        Self {
            trackname: trackname.into(),
            filename: filename.into(),
            tc_start: tc_start.into(),
            tc_end: tc_end.into(),
        }
    }

    /// Whether every field is non-empty. Incomplete rows produce no block.
    pub fn is_complete(&self) -> bool {
        !self.trackname.is_empty()
            && !self.filename.is_empty()
            && !self.tc_start.is_empty()
            && !self.tc_end.is_empty()
    }
}

/// Which end of the range a timecode failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    Start,
    End,
}

/// Timecode failure while building a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTimecodeError {
    pub end: RangeEnd,
    pub value: String,
    pub source: TimecodeError,
}

/// Start and end of a block, split for display plus absolute seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcRange {
    pub start_hour: String,
    pub start_minute: String,
    pub start_second: String,
    pub start_absolute: u64,
    pub end_hour: String,
    pub end_minute: String,
    pub end_second: String,
    pub end_absolute: u64,
}

impl TcRange {
    /// Build a range from the raw start and end timecode strings.
    pub fn from_timecodes(tc_start: &str, tc_end: &str) -> Result<Self, BlockTimecodeError> {
        let (start, start_absolute) = split(tc_start, RangeEnd::Start)?;
        let (end, end_absolute) = split(tc_end, RangeEnd::End)?;

        Ok(Self {
            start_hour: start.0,
            start_minute: start.1,
            start_second: start.2,
            start_absolute,
            end_hour: end.0,
            end_minute: end.1,
            end_second: end.2,
            end_absolute,
        })
    }

    fn to_element(&self) -> Element {
        Element::new("tcRange")
            .with_child(Element::new("startHour").with_text(&self.start_hour))
            .with_child(Element::new("startMinute").with_text(&self.start_minute))
            .with_child(Element::new("startSecond").with_text(&self.start_second))
            .with_child(Element::new("startAbsolute").with_text(self.start_absolute.to_string()))
            .with_child(Element::new("endHour").with_text(&self.end_hour))
            .with_child(Element::new("endMinute").with_text(&self.end_minute))
            .with_child(Element::new("endSecond").with_text(&self.end_second))
            .with_child(Element::new("endAbsolute").with_text(self.end_absolute.to_string()))
    }
}

type DisplayTriple = (String, String, String);

fn split(tc: &str, end: RangeEnd) -> Result<(DisplayTriple, u64), BlockTimecodeError> {
    let wrap = |source| BlockTimecodeError {
        end,
        value: tc.to_string(),
        source,
    };
    let absolute = Timecode::parse(tc).map_err(wrap)?.absolute_seconds();
    let fields = display_fields(tc).map_err(wrap)?;
    Ok((
        (
            fields.hour.to_string(),
            fields.minute.to_string(),
            fields.second.to_string(),
        ),
        absolute,
    ))
}

/// One timecode-ranged entry of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: Uuid,
    pub tc_range: TcRange,
    pub initialized: bool,
    pub title: String,
    pub filename: String,
    /// Start timecode exactly as it appeared in the row.
    pub start_tc: String,
    /// End timecode exactly as it appeared in the row.
    pub end_tc: String,
}

impl Block {
    /// Convert to a `<Block>` element in output schema order.
    pub fn to_element(&self) -> Element {
        Element::new("Block")
            .with_child(Element::new("id").with_text(self.id.to_string()))
            .with_child(self.tc_range.to_element())
            .with_child(Element::new("initialized").with_text(self.initialized.to_string()))
            .with_child(Element::new("title").with_text(&self.title))
            .with_child(Element::new("filename").with_text(&self.filename))
            .with_child(Element::new("startTC").with_text(&self.start_tc))
            .with_child(Element::new("endTC").with_text(&self.end_tc))
    }
}

/// Builds blocks from row fields.
#[derive(Debug, Clone, Copy)]
pub struct BlockBuilder {
    /// Run title and filename through [`sanitize`].
    pub sanitize: bool,
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self { sanitize: true }
    }
}

impl BlockBuilder {
    /// Create a builder.
    pub fn new(sanitize: bool) -> Self {
        Self { sanitize }
    }

    /// Build a block with a freshly generated id.
    ///
    /// Callers are expected to check [`BlockFields::is_complete`] first.
    pub fn build(&self, fields: &BlockFields) -> Result<Block, BlockTimecodeError> {
        let tc_range = TcRange::from_timecodes(&fields.tc_start, &fields.tc_end)?;

        let (title, filename) = if self.sanitize {
            (sanitize(&fields.trackname), sanitize(&fields.filename))
        } else {
            (fields.trackname.clone(), fields.filename.clone())
        };

        Ok(Block {
            id: Uuid::new_v4(),
            tc_range,
            initialized: true,
            title,
            filename,
            start_tc: fields.tc_start.clone(),
            end_tc: fields.tc_end.clone(),
        })
    }
}
