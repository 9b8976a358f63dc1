// LogExtract - core/parser.rs
//
// Stream-oriented extract parsing.
// Core layer: accepts Read trait objects, never touches the filesystem.
//
// The source is taken by value: it is consumed exactly once and dropped
// (closed) on every return path, success or failure.

use crate::core::model::{LineRejection, LogRecord, ParseResult, SkippedLine};
use crate::util::constants;
use crate::util::error::ParseError;
use std::io::{self, BufRead, BufReader, Read};

/// Configuration for parsing operations.
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    /// Require the first line to equal `HEADER_LINE` instead of merely
    /// being present.
    pub strict_header: bool,
}

// =============================================================================
// Warning sinks
// =============================================================================

/// Receiver for data lines the parser skips.
///
/// Injected into the parser so callers decide where warnings go; the parser
/// itself never writes to a global logger.
pub trait WarningSink {
    fn skipped(&mut self, line: SkippedLine);
}

impl<S: WarningSink + ?Sized> WarningSink for &mut S {
    fn skipped(&mut self, line: SkippedLine) {
        (**self).skipped(line);
    }
}

/// Emits each skipped line as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn skipped(&mut self, line: SkippedLine) {
        tracing::warn!(
            line = line.line_number,
            reason = %line.reason,
            "{}",
            line.message()
        );
    }
}

/// Keeps every skipped line in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    lines: Vec<SkippedLine>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[SkippedLine] {
        &self.lines
    }

    /// Warning messages in the order they were reported.
    pub fn messages(&self) -> Vec<String> {
        self.lines.iter().map(SkippedLine::message).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<SkippedLine> {
        self.lines
    }
}

impl WarningSink for CollectingSink {
    fn skipped(&mut self, line: SkippedLine) {
        self.lines.push(line);
    }
}

// =============================================================================
// Pipeline stages
// =============================================================================

/// Parse an extract stream: skip the header, then turn every remaining line
/// into a `LogRecord`.
///
/// Malformed lines go to `sink` and parsing continues. A missing header or
/// any I/O failure aborts the whole call and discards records read so far.
pub fn parse_records<R, S>(
    source: R,
    config: &ParseConfig,
    sink: &mut S,
) -> Result<ParseResult, ParseError>
where
    R: Read,
    S: WarningSink + ?Sized,
{
    let mut reader = BufReader::new(source);
    skip_header(&mut reader, config)?;
    let result = read_records(reader, sink)?;

    tracing::debug!(
        records = result.records.len(),
        skipped = result.skipped_lines,
        lines = result.lines_processed,
        "Extract parsed"
    );

    Ok(result)
}

/// Read and discard the header line.
///
/// Only presence is checked unless `config.strict_header` is set. An empty
/// stream is a `Format` error.
pub fn skip_header<B: BufRead + ?Sized>(
    reader: &mut B,
    config: &ParseConfig,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let header = read_line_lossy(reader, &mut buf)
        .map_err(|source| ParseError::Read {
            operation: "skipping header line",
            source,
        })?
        .ok_or_else(|| ParseError::format("stream ended before the header line"))?;

    let header = header.as_str();
    if config.strict_header && header != constants::HEADER_LINE {
        return Err(ParseError::format(format!(
            "expected header '{}' but found '{header}'",
            constants::HEADER_LINE
        )));
    }

    tracing::trace!(header, "Header skipped");
    Ok(())
}

/// Read every remaining line of `reader` into records, in input order.
///
/// Line numbers reported to `sink` assume the header was line 1.
pub fn read_records<B, S>(mut reader: B, sink: &mut S) -> Result<ParseResult, ParseError>
where
    B: BufRead,
    S: WarningSink + ?Sized,
{
    let mut result = ParseResult::default();
    let mut buf = Vec::new();

    loop {
        let line = match read_line_lossy(&mut reader, &mut buf) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(source) => {
                return Err(ParseError::Read {
                    operation: "reading log extract lines",
                    source,
                })
            }
        };
        result.lines_processed += 1;

        match parse_line(&line) {
            Ok(record) => result.records.push(record),
            Err(reason) => {
                result.skipped_lines += 1;
                sink.skipped(SkippedLine {
                    line_number: result.lines_processed + 1,
                    raw_line: line,
                    reason,
                });
            }
        }
    }

    Ok(result)
}

/// Parse a single data line (without terminator).
///
/// The line must split on `,` into exactly three fields and the third must
/// be a base-10 `i64`. Trailing empty fields are dropped before counting, so
/// `t,US,5,,` has three fields; a line with no separator is one field. The
/// timestamp column is not interpreted.
pub fn parse_line(line: &str) -> Result<LogRecord, LineRejection> {
    let mut fields: Vec<&str> = line.split(constants::FIELD_SEPARATOR).collect();
    if fields.len() > 1 {
        while fields.last() == Some(&"") {
            fields.pop();
        }
    }
    if fields.len() != constants::FIELD_COUNT {
        return Err(LineRejection::FieldCount {
            found: fields.len(),
        });
    }

    let raw_time = fields[constants::RESPONSE_TIME_FIELD];
    let response_time = raw_time
        .parse::<i64>()
        .map_err(|source| LineRejection::ResponseTime {
            value: raw_time.to_string(),
            source,
        })?;

    Ok(LogRecord::new(fields[constants::COUNTRY_FIELD], response_time))
}

/// Read one `\n`-terminated line, decoding invalid UTF-8 lossily.
///
/// Returns `None` at end of stream. The terminator (`\n` or `\r\n`) is
/// removed.
fn read_line_lossy<B: BufRead + ?Sized>(
    reader: &mut B,
    buf: &mut Vec<u8>,
) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf);
    Ok(Some(trim_line_ending(&line).to_string()))
}

fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
