// LogExtract - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use std::fmt;
use std::num::ParseIntError;

// =============================================================================
// Log Record (output of parsing)
// =============================================================================

/// A single parsed extract line.
///
/// Only the fields the filters consume are retained; the request timestamp
/// column is accepted but never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    /// Country code, verbatim from column 2 (e.g. "GB", "US").
    pub country: String,

    /// Response time from column 3.
    pub response_time: i64,
}

impl LogRecord {
    pub fn new(country: impl Into<String>, response_time: i64) -> Self {
        Self {
            country: country.into(),
            response_time,
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.country,
            constants::FIELD_SEPARATOR,
            self.response_time
        )
    }
}

// =============================================================================
// Skipped lines
// =============================================================================

/// Why a data line was not turned into a `LogRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRejection {
    /// The line did not split into exactly three fields.
    FieldCount { found: usize },

    /// The response time field is not a base-10 64-bit integer.
    ResponseTime {
        value: String,
        source: ParseIntError,
    },
}

impl fmt::Display for LineRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount { found } => write!(
                f,
                "expected {} fields but found {found}",
                constants::FIELD_COUNT
            ),
            Self::ResponseTime { value, source } => {
                write!(f, "response time '{value}' is not an integer: {source}")
            }
        }
    }
}

impl std::error::Error for LineRejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ResponseTime { source, .. } => Some(source),
            Self::FieldCount { .. } => None,
        }
    }
}

/// A malformed data line reported to the warning sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the stream (the header is line 1).
    pub line_number: u64,

    /// The offending line, without its terminator.
    pub raw_line: String,

    /// What was wrong with it.
    pub reason: LineRejection,
}

impl SkippedLine {
    /// Warning text: fixed prefix followed by the raw line.
    pub fn message(&self) -> String {
        format!("{}{}", constants::SKIPPED_LINE_PREFIX, self.raw_line)
    }
}

// =============================================================================
// Parse Result
// =============================================================================

/// Result of parsing one extract stream.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Successfully parsed records, in input line order.
    pub records: Vec<LogRecord>,

    /// Data lines reported to the warning sink and left out of `records`.
    pub skipped_lines: u64,

    /// Data lines read after the header.
    pub lines_processed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display() {
        assert_eq!(LogRecord::new("GB", 30).to_string(), "GB,30");
    }

    #[test]
    fn test_skipped_line_message_has_prefix_and_raw_line() {
        let skipped = SkippedLine {
            line_number: 4,
            raw_line: "1432666090,DE,slow".to_string(),
            reason: LineRejection::FieldCount { found: 2 },
        };
        assert_eq!(
            skipped.message(),
            "Line failed parsing. Ignoring line: 1432666090,DE,slow"
        );
    }

    #[test]
    fn test_rejection_display() {
        let reason = LineRejection::FieldCount { found: 2 };
        assert_eq!(reason.to_string(), "expected 3 fields but found 2");
    }
}
