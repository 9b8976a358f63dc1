// LogExtract - util/constants.rs
//
// Single source of truth for named constants, input layout, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogExtract";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LogExtract";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input layout
// =============================================================================

/// The fixed first line of every extract, without its line terminator.
pub const HEADER_LINE: &str = "REQUEST_TIMESTAMP,COUNTRY_CODE,RESPONSE_TIME";

/// Separator between fields of a data line.
pub const FIELD_SEPARATOR: char = ',';

/// Number of fields a data line must split into.
pub const FIELD_COUNT: usize = 3;

/// Zero-based column of the country code.
pub const COUNTRY_FIELD: usize = 1;

/// Zero-based column of the response time.
pub const RESPONSE_TIME_FIELD: usize = 2;

/// Prefix of the warning emitted for every data line that is skipped.
pub const SKIPPED_LINE_PREFIX: &str = "Line failed parsing. Ignoring line: ";

// =============================================================================
// Configuration & logging
// =============================================================================

/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Log level used when neither RUST_LOG, --debug, nor config selects one.
///
/// Warn so skipped-line warnings are visible without drowning stdout users.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
