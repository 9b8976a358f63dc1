// LogExtract - core/filter.rs
//
// Filter predicates over parsed records.
// Core layer: pure logic, no I/O. Input order is always preserved.

use crate::core::model::LogRecord;

/// Which subset of records to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCriteria {
    /// Records whose country equals this code (exact, case-sensitive).
    Country(String),

    /// Records of `country` whose response time is strictly above `limit`.
    CountryAboveLimit { country: String, limit: i64 },

    /// Records whose response time is strictly above the mean response time
    /// of all parsed records.
    AboveAverage,
}

impl FilterCriteria {
    pub fn country(country: impl Into<String>) -> Self {
        Self::Country(country.into())
    }

    pub fn country_above_limit(country: impl Into<String>, limit: i64) -> Self {
        Self::CountryAboveLimit {
            country: country.into(),
            limit,
        }
    }
}

/// Criteria with any dataset-wide value already computed.
enum Predicate<'a> {
    Country(&'a str),
    CountryAboveLimit { country: &'a str, limit: i64 },
    Above(f64),
    Nothing,
}

impl<'a> Predicate<'a> {
    fn resolve(records: &[LogRecord], criteria: &'a FilterCriteria) -> Self {
        match criteria {
            FilterCriteria::Country(country) => Self::Country(country),
            FilterCriteria::CountryAboveLimit { country, limit } => Self::CountryAboveLimit {
                country,
                limit: *limit,
            },
            FilterCriteria::AboveAverage => match average_response_time(records) {
                Some(mean) => Self::Above(mean),
                None => Self::Nothing,
            },
        }
    }

    fn matches(&self, record: &LogRecord) -> bool {
        match *self {
            Self::Country(country) => record.country == country,
            Self::CountryAboveLimit { country, limit } => {
                record.country == country && record.response_time > limit
            }
            // Integer widened to f64 to compare against the fractional mean.
            Self::Above(mean) => record.response_time as f64 > mean,
            Self::Nothing => false,
        }
    }
}

/// Arithmetic mean of all response times, or `None` for no records.
///
/// Summed in `i128` so large `i64` values cannot overflow before the
/// floating-point division.
pub fn average_response_time(records: &[LogRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: i128 = records.iter().map(|r| i128::from(r.response_time)).sum();
    Some(total as f64 / records.len() as f64)
}

/// Apply criteria to a slice of records, returning indices of matches.
pub fn apply_filter(records: &[LogRecord], criteria: &FilterCriteria) -> Vec<usize> {
    let predicate = Predicate::resolve(records, criteria);

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| predicate.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}

/// Consume `records`, keeping only those matching `criteria`.
pub fn retain_matching(mut records: Vec<LogRecord>, criteria: &FilterCriteria) -> Vec<LogRecord> {
    let predicate = Predicate::resolve(&records, criteria);
    records.retain(|record| predicate.matches(record));
    records
}
