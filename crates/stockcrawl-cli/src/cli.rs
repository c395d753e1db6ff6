//! CLI argument definitions for stockcrawl.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--api-key` | `$STOCKCRAWL_ALPHAVANTAGE_API_KEY` | Alpha Vantage API key |
//! | `--symbols-file` | `Crawl_code/symbol.txt` | One symbol per line |
//! | `--output-dir` | `datack` | Where CSV files are written |
//! | `--date-stamp` | `2020-12-15` | Suffix of every output file name |
//! | `--delay-secs` | `15` | Pause between consecutive requests |
//! | `--limit` | `10` | Maximum symbols per run |
//! | `--timeout-secs` | `30` | Per-request timeout |
//! | `--pacing` | `fixed` | `fixed` delay or `quota` token bucket |
//! | `--quota-per-minute` | `5` | Ceiling used by `--pacing quota` |
//! | `--json` | `false` | Print the run summary as JSON |
//!
//! # Examples
//!
//! ```bash
//! # Crawl the default symbol file
//! STOCKCRAWL_ALPHAVANTAGE_API_KEY=... stockcrawl
//!
//! # Three symbols from a custom list, no pause, JSON summary
//! stockcrawl --symbols-file watchlist.txt --limit 3 --delay-secs 0 --json
//!
//! # Let the token bucket space requests at 5 per minute
//! stockcrawl --pacing quota --quota-per-minute 5
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use stockcrawl_core::config::{
    DEFAULT_BASE_URL, DEFAULT_DATE_STAMP, DEFAULT_OUTPUT_DIR, DEFAULT_SYMBOLS_FILE,
};
use stockcrawl_core::pacing::ALPHAVANTAGE_QUOTA_PER_MINUTE;
use stockcrawl_core::{ApiKey, CrawlConfig, PacingMode};

/// Stockcrawl - daily price history crawler for Alpha Vantage
///
/// Reads a list of ticker symbols, requests each symbol's full daily series
/// one at a time under a rate limit, and writes one CSV file per symbol.
#[derive(Debug, Parser)]
#[command(
    name = "stockcrawl",
    author,
    version,
    about = "Rate-limited Alpha Vantage daily series crawler"
)]
pub struct Cli {
    /// Alpha Vantage API key.
    ///
    /// Falls back to the STOCKCRAWL_ALPHAVANTAGE_API_KEY environment variable.
    /// The run aborts before any request when the key is missing or still the
    /// sample placeholder.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Symbol list, one ticker per line. `#` starts a comment line.
    ///
    /// A built-in list of ten large caps is used when the file does not exist.
    #[arg(long, default_value = DEFAULT_SYMBOLS_FILE)]
    pub symbols_file: PathBuf,

    /// Directory for the CSV output, created if missing.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Suffix used in every output file name.
    #[arg(long, default_value = DEFAULT_DATE_STAMP)]
    pub date_stamp: String,

    /// Seconds to wait between consecutive requests (fixed pacing).
    #[arg(long, default_value_t = 15)]
    pub delay_secs: u64,

    /// Maximum number of symbols processed in this run.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// API endpoint.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Admission control strategy.
    #[arg(long, value_enum, default_value_t = PacingArg::Fixed)]
    pub pacing: PacingArg,

    /// Requests allowed per minute when `--pacing quota` is selected.
    #[arg(long, default_value_t = ALPHAVANTAGE_QUOTA_PER_MINUTE)]
    pub quota_per_minute: u32,

    /// Print the final run summary as a JSON object on stdout.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Pacing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PacingArg {
    /// Sleep `--delay-secs` between consecutive requests.
    Fixed,
    /// Token bucket admitting `--quota-per-minute` requests per minute.
    Quota,
}

impl Cli {
    pub fn to_config(&self) -> CrawlConfig {
        let pacing = match self.pacing {
            PacingArg::Fixed => PacingMode::FixedDelay,
            PacingArg::Quota => PacingMode::Quota {
                per_minute: self.quota_per_minute,
            },
        };

        CrawlConfig {
            base_url: self.base_url.clone(),
            symbols_file: self.symbols_file.clone(),
            output_dir: self.output_dir.clone(),
            date_stamp: self.date_stamp.clone(),
            delay: Duration::from_secs(self.delay_secs),
            limit: self.limit,
            timeout: Duration::from_secs(self.timeout_secs),
            pacing,
            ..CrawlConfig::new(ApiKey::resolve(self.api_key.clone()))
        }
    }
}
