// LogExtract - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Running one filter over one extract file

use clap::{Parser, Subcommand};
use logextract::app::filterer::ExtractFilterer;
use logextract::core::filter::FilterCriteria;
use logextract::platform;
use logextract::util;
use std::path::PathBuf;

/// LogExtract - filter a REQUEST_TIMESTAMP,COUNTRY_CODE,RESPONSE_TIME extract.
///
/// Matching records are written to stdout as `COUNTRY,RESPONSE_TIME`, one per
/// line. Malformed lines are skipped with a warning on stderr.
#[derive(Parser, Debug)]
#[command(name = "logextract", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Fail unless the first line is exactly the expected header.
    #[arg(long = "strict-header", global = true)]
    strict_header: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Records from one country.
    Country {
        /// Extract file to read.
        file: PathBuf,
        /// Country code, matched exactly (case-sensitive).
        country: String,
    },

    /// Records from one country with a response time above a limit.
    AboveLimit {
        file: PathBuf,
        country: String,
        /// Exclusive lower bound on response time.
        #[arg(allow_negative_numbers = true)]
        limit: i64,
    },

    /// Records with a response time above the extract's average.
    AboveAverage { file: PathBuf },
}

impl Command {
    fn file(&self) -> &PathBuf {
        match self {
            Self::Country { file, .. }
            | Self::AboveLimit { file, .. }
            | Self::AboveAverage { file } => file,
        }
    }

    fn criteria(&self) -> FilterCriteria {
        match self {
            Self::Country { country, .. } => FilterCriteria::country(country.as_str()),
            Self::AboveLimit { country, limit, .. } => {
                FilterCriteria::country_above_limit(country.as_str(), *limit)
            }
            Self::AboveAverage { .. } => FilterCriteria::AboveAverage,
        }
    }
}

fn run(cli: Cli) -> util::error::Result<()> {
    let (config_path, (config, config_warnings)) = match cli.config {
        Some(ref path) => (path.clone(), platform::config::load_config_strict(path)?),
        None => {
            let path = platform::config::PlatformPaths::resolve().config_file();
            let loaded = platform::config::load_config(&path);
            (path, loaded)
        }
    };

    util::logging::init(cli.debug, config.log_level.as_deref(), &config_path);
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let mut parse_config = config.parse_config();
    parse_config.strict_header |= cli.strict_header;

    let path = cli.command.file();
    let criteria = cli.command.criteria();
    tracing::info!(
        version = util::constants::APP_VERSION,
        file = %path.display(),
        criteria = ?criteria,
        "Filtering extract"
    );

    let source = platform::fs::open_extract(path)?;
    let records = ExtractFilterer::with_config(parse_config).filter(source, &criteria)?;

    for record in &records {
        println!("{record}");
    }
    tracing::info!(matched = records.len(), "Done");

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Filtering failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
