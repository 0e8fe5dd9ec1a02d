//! Timecode parsing.
//!
//! Timecodes arrive as `HH:MM:SS:FF`. Only hours, minutes and seconds feed
//! the absolute-seconds value; the frames component is carried but never
//! counted.

use std::num::{IntErrorKind, ParseIntError};

/// Errors that can occur while parsing a timecode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimecodeError {
    /// Fewer than hours, minutes and seconds were present.
    #[error("expected at least 3 ':'-separated components, found {found}")]
    TooFewComponents { found: usize },

    /// More than hours, minutes, seconds and frames were present.
    #[error("expected at most 4 ':'-separated components, found {found}")]
    TooManyComponents { found: usize },

    /// A component is not an integer.
    #[error("component '{0}' is not a number")]
    NotNumeric(String),

    /// A component is a negative integer.
    #[error("component '{0}' is negative")]
    Negative(String),

    /// A component does not fit in 32 bits.
    #[error("component '{0}' is out of range")]
    OutOfRange(String),
}

/// A parsed `HH:MM:SS[:FF]` timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timecode {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// Frames, when the source carried a fourth component.
    pub frames: Option<u32>,
}

impl Timecode {
    /// Parse a timecode string.
    ///
    /// Accepts three or four components. Each component may carry
    /// surrounding whitespace.
    pub fn parse(tc: &str) -> Result<Self, TimecodeError> {
        let parts: Vec<&str> = tc.split(':').collect();
        if parts.len() < 3 {
            return Err(TimecodeError::TooFewComponents { found: parts.len() });
        }
        if parts.len() > 4 {
            return Err(TimecodeError::TooManyComponents { found: parts.len() });
        }

        let values = parts
            .iter()
            .map(|p| parse_component(p))
            .collect::<Result<Vec<u32>, _>>()?;

        Ok(Self {
            hours: values[0],
            minutes: values[1],
            seconds: values[2],
            frames: values.get(3).copied(),
        })
    }

    /// Seconds since hour zero, ignoring frames.
    pub fn absolute_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

fn parse_component(part: &str) -> Result<u32, TimecodeError> {
    let digits = part.trim();
    digits.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => TimecodeError::OutOfRange(part.to_string()),
        _ if is_negative_integer(digits) => TimecodeError::Negative(part.to_string()),
        _ => TimecodeError::NotNumeric(part.to_string()),
    })
}

fn is_negative_integer(s: &str) -> bool {
    s.strip_prefix('-')
        .is_some_and(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
}

/// Convert a timecode string to absolute seconds.
pub fn to_absolute_seconds(tc: &str) -> Result<u64, TimecodeError> {
    Timecode::parse(tc).map(|t| t.absolute_seconds())
}

/// Raw text of the hour, minute and second components.
///
/// The display fields of a block keep the source text as written
/// (`"01"` stays `"01"`), so they are split out rather than reformatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFields<'a> {
    pub hour: &'a str,
    pub minute: &'a str,
    pub second: &'a str,
}

/// Split the first three components of a timecode for display.
///
/// A missing frames component is fine; it is never read here.
pub fn display_fields(tc: &str) -> Result<DisplayFields<'_>, TimecodeError> {
    let mut parts = tc.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(hour), Some(minute), Some(second)) => Ok(DisplayFields {
            hour,
            minute,
            second,
        }),
        _ => Err(TimecodeError::TooFewComponents {
            found: tc.split(':').count(),
        }),
    }
}
