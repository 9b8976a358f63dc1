// LogExtract - app/filterer.rs
//
// Entry points. Every call runs the full pipeline on its own stream:
// skip header, parse lines, filter, collect.
//
// Streams are taken by value, so a stream can never be filtered twice and is
// always dropped (closed) before the call returns. `parse` is the
// parse-once alternative for callers that want several subsets of one
// stream.

use crate::core::filter::{self, FilterCriteria};
use crate::core::model::LogRecord;
use crate::core::parser::{self, ParseConfig, TracingSink, WarningSink};
use crate::util::error::ParseError;
use std::io::Read;

/// Runs filter pipelines with a fixed parse configuration and warning sink.
#[derive(Debug, Clone, Default)]
pub struct ExtractFilterer<S = TracingSink> {
    config: ParseConfig,
    sink: S,
}

impl ExtractFilterer<TracingSink> {
    /// Default configuration; skipped lines become `tracing` warnings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParseConfig) -> Self {
        Self::with_sink(config, TracingSink)
    }
}

impl<S: WarningSink> ExtractFilterer<S> {
    pub fn with_sink(config: ParseConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// All records whose country equals `country`.
    pub fn filter_by_country<R: Read>(
        &mut self,
        source: R,
        country: &str,
    ) -> Result<Vec<LogRecord>, ParseError> {
        self.filter(source, &FilterCriteria::country(country))
    }

    /// Records of `country` whose response time is strictly above `limit`.
    pub fn filter_by_country_with_response_time_above_limit<R: Read>(
        &mut self,
        source: R,
        country: &str,
        limit: i64,
    ) -> Result<Vec<LogRecord>, ParseError> {
        self.filter(source, &FilterCriteria::country_above_limit(country, limit))
    }

    /// Records whose response time is strictly above the mean of all parsed
    /// records.
    pub fn filter_by_response_time_above_average<R: Read>(
        &mut self,
        source: R,
    ) -> Result<Vec<LogRecord>, ParseError> {
        self.filter(source, &FilterCriteria::AboveAverage)
    }

    /// Run the full pipeline for arbitrary criteria.
    pub fn filter<R: Read>(
        &mut self,
        source: R,
        criteria: &FilterCriteria,
    ) -> Result<Vec<LogRecord>, ParseError> {
        let parsed = parser::parse_records(source, &self.config, &mut self.sink)?;
        let total = parsed.records.len();
        let matched = filter::retain_matching(parsed.records, criteria);

        tracing::debug!(
            criteria = ?criteria,
            parsed = total,
            matched = matched.len(),
            "Filter applied"
        );

        Ok(matched)
    }

    /// Parse `source` once and keep the records for repeated filtering.
    pub fn parse<R: Read>(&mut self, source: R) -> Result<ParsedExtract, ParseError> {
        let parsed = parser::parse_records(source, &self.config, &mut self.sink)?;
        Ok(ParsedExtract {
            records: parsed.records,
            skipped_lines: parsed.skipped_lines,
        })
    }
}

/// The records of one fully parsed extract.
#[derive(Debug, Clone, Default)]
pub struct ParsedExtract {
    records: Vec<LogRecord>,
    skipped_lines: u64,
}

impl ParsedExtract {
    /// Records in input line order.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Data lines that were reported as malformed and left out.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }

    pub fn average_response_time(&self) -> Option<f64> {
        filter::average_response_time(&self.records)
    }

    /// Matching records, in input order.
    pub fn select(&self, criteria: &FilterCriteria) -> Vec<&LogRecord> {
        filter::apply_filter(&self.records, criteria)
            .into_iter()
            .map(|idx| &self.records[idx])
            .collect()
    }

    pub fn into_records(self) -> Vec<LogRecord> {
        self.records
    }
}

// =============================================================================
// Default-configured entry points
// =============================================================================

/// `ExtractFilterer::filter_by_country` with defaults.
pub fn filter_by_country<R: Read>(source: R, country: &str) -> Result<Vec<LogRecord>, ParseError> {
    ExtractFilterer::new().filter_by_country(source, country)
}

/// `ExtractFilterer::filter_by_country_with_response_time_above_limit` with
/// defaults.
pub fn filter_by_country_with_response_time_above_limit<R: Read>(
    source: R,
    country: &str,
    limit: i64,
) -> Result<Vec<LogRecord>, ParseError> {
    ExtractFilterer::new().filter_by_country_with_response_time_above_limit(source, country, limit)
}

/// `ExtractFilterer::filter_by_response_time_above_average` with defaults.
pub fn filter_by_response_time_above_average<R: Read>(
    source: R,
) -> Result<Vec<LogRecord>, ParseError> {
    ExtractFilterer::new().filter_by_response_time_above_average(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::CollectingSink;
    use std::io;

    const MULTI: &str = "REQUEST_TIMESTAMP,COUNTRY_CODE,RESPONSE_TIME\n\
                         1433190845,US,500\n\
                         1432917066,US,900\n\
                         1433099316,GB,30\n\
                         1432666090,DE,slow\n\
                         1432484176,US,50\n";

    #[test]
    fn test_filter_by_country_counts() {
        assert_eq!(filter_by_country(MULTI.as_bytes(), "US").unwrap().len(), 3);
        assert_eq!(filter_by_country(MULTI.as_bytes(), "GB").unwrap().len(), 1);
        assert!(filter_by_country(MULTI.as_bytes(), "DE").unwrap().is_empty());
    }

    #[test]
    fn test_filter_above_limit() {
        let result =
            filter_by_country_with_response_time_above_limit(MULTI.as_bytes(), "US", 800).unwrap();
        assert_eq!(result, vec![LogRecord::new("US", 900)]);
    }

    #[test]
    fn test_filter_above_average() {
        let result = filter_by_response_time_above_average(MULTI.as_bytes()).unwrap();
        assert_eq!(
            result,
            vec![LogRecord::new("US", 500), LogRecord::new("US", 900)]
        );
    }

    #[test]
    fn test_every_entry_point_rejects_empty_stream() {
        assert!(filter_by_country(io::empty(), "GB").unwrap_err().is_format());
        assert!(
            filter_by_country_with_response_time_above_limit(io::empty(), "GB", 0)
                .unwrap_err()
                .is_format()
        );
        assert!(filter_by_response_time_above_average(io::empty())
            .unwrap_err()
            .is_format());
    }

    #[test]
    fn test_injected_sink_sees_warnings_per_call() {
        let mut filterer = ExtractFilterer::with_sink(ParseConfig::default(), CollectingSink::new());
        filterer.filter_by_country(MULTI.as_bytes(), "US").unwrap();
        filterer.filter_by_response_time_above_average(MULTI.as_bytes()).unwrap();

        let sink = filterer.into_sink();
        assert_eq!(sink.len(), 2);
        assert!(sink.messages().iter().all(|m| m.ends_with("1432666090,DE,slow")));
    }

    #[test]
    fn test_borrowed_sink() {
        let mut sink = CollectingSink::new();
        {
            let mut filterer = ExtractFilterer::with_sink(ParseConfig::default(), &mut sink);
            filterer.filter_by_country(MULTI.as_bytes(), "GB").unwrap();
        }
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_parse_once_filter_many() {
        let extract = ExtractFilterer::new().parse(MULTI.as_bytes()).unwrap();
        assert_eq!(extract.len(), 4);
        assert_eq!(extract.skipped_lines(), 1);
        assert_eq!(extract.average_response_time(), Some(370.0));

        let us = extract.select(&FilterCriteria::country("US"));
        assert_eq!(us.len(), 3);
        let above = extract.select(&FilterCriteria::AboveAverage);
        assert_eq!(above, vec![&LogRecord::new("US", 500), &LogRecord::new("US", 900)]);
    }

    #[test]
    fn test_bad_bytes_and_trailing_separator_do_not_lose_records() {
        let mut bytes = b"REQUEST_TIMESTAMP,COUNTRY_CODE,RESPONSE_TIME\n1,US,500,\n".to_vec();
        bytes.extend_from_slice(b"2,D\xC9,10\n3,US,50\n");

        let result = filter_by_country(bytes.as_slice(), "US").unwrap();
        assert_eq!(
            result,
            vec![LogRecord::new("US", 500), LogRecord::new("US", 50)]
        );
    }

    #[test]
    fn test_accessors_reflect_construction() {
        let config = ParseConfig {
            strict_header: true,
        };
        let mut filterer = ExtractFilterer::with_sink(config, CollectingSink::new());
        assert!(filterer.config().strict_header);
        assert!(filterer.sink().is_empty());

        filterer.filter_by_country(MULTI.as_bytes(), "US").unwrap();
        assert_eq!(filterer.sink().len(), 1);
    }

    #[test]
    fn test_parsed_extract_into_records_keeps_order() {
        let extract = ExtractFilterer::new().parse(MULTI.as_bytes()).unwrap();
        assert!(!extract.is_empty());
        assert_eq!(
            extract.into_records(),
            vec![
                LogRecord::new("US", 500),
                LogRecord::new("US", 900),
                LogRecord::new("GB", 30),
                LogRecord::new("US", 50),
            ]
        );
    }

    #[test]
    fn test_strict_config_is_applied() {
        let mut filterer = ExtractFilterer::with_config(ParseConfig {
            strict_header: true,
        });
        let err = filterer
            .filter_by_country("A,B,C\n1,GB,2\n".as_bytes(), "GB")
            .unwrap_err();
        assert!(err.is_format());
    }
}
