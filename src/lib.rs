// LogExtract - lib.rs
//
// Library entry point. The binary in `main.rs` is a thin CLI over these
// modules.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use app::filterer::{
    filter_by_country, filter_by_country_with_response_time_above_limit,
    filter_by_response_time_above_average, ExtractFilterer, ParsedExtract,
};
pub use crate::core::filter::FilterCriteria;
pub use crate::core::model::{LineRejection, LogRecord, SkippedLine};
pub use crate::core::parser::{CollectingSink, ParseConfig, TracingSink, WarningSink};
pub use util::error::{LogExtractError, ParseError};
