// LogExtract - util/logging.rs
//
// Structured logging with runtime-selectable level.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// Output: stderr, so stdout stays reserved for filtered records.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem.
///
/// `config_path` is the config.toml that was consulted (whether or not it
/// existed) and is reported once logging is up.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default.
pub fn init(debug_flag: bool, config_level: Option<&str>, config_path: &Path) {
    let (filter, level_source) = if std::env::var("RUST_LOG").is_ok() {
        (EnvFilter::from_default_env(), "RUST_LOG")
    } else if debug_flag {
        (EnvFilter::new("debug"), "--debug")
    } else if let Some(level) = config_level {
        (EnvFilter::new(level), "config")
    } else {
        (
            EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL),
            "default",
        )
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        level_source,
        config = %config_path.display(),
        "Logging initialised"
    );
}
