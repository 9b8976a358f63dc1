// LogExtract - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Malformed data lines are NOT errors; they go to the warning sink
// (see core::parser). Only stream-level failures surface here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogExtract operations.
#[derive(Debug)]
pub enum LogExtractError {
    /// Reading or parsing an extract stream failed.
    Parse(ParseError),

    /// Configuration loading failed.
    Config(ConfigError),

    /// I/O error with path context (e.g. opening an extract file).
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LogExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Terminal failures of a single filter call. No partial result is ever
/// returned alongside one of these.
#[derive(Debug)]
pub enum ParseError {
    /// Header missing, truncated, or (in strict mode) not the expected line.
    Format { reason: String },

    /// Underlying I/O failure while skipping the header or reading lines.
    Read {
        operation: &'static str,
        source: io::Error,
    },
}

impl ParseError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }

    /// True for `Format` failures.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// True for `Read` failures.
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format { reason } => write!(f, "Unexpected header/format: {reason}"),
            Self::Read { operation, source } => {
                write!(f, "Failed while {operation}: {source}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Format { .. } => None,
        }
    }
}

impl From<ParseError> for LogExtractError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for LogExtractError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogExtract results.
pub type Result<T> = std::result::Result<T, LogExtractError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_read_error_preserves_cause() {
        let err = ParseError::Read {
            operation: "reading data lines",
            source: io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
        };
        assert!(err.is_read());
        assert!(err.to_string().contains("reading data lines"));
        let cause = err.source().unwrap();
        assert_eq!(cause.to_string(), "pipe closed");
    }

    #[test]
    fn test_format_error_has_no_source() {
        let err = ParseError::format("stream is empty");
        assert!(err.is_format());
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Unexpected header/format: stream is empty");
    }

    #[test]
    fn test_top_level_wraps_parse_error() {
        let err: LogExtractError = ParseError::format("x").into();
        assert!(matches!(err, LogExtractError::Parse(ParseError::Format { .. })));
        assert!(err.to_string().starts_with("Parse error:"));
    }
}
