//! Run configuration and the credential guard.
//!
//! Everything here is checked once, before the first request goes out. A
//! config that fails [`CrawlConfig::validate`] must never reach the fetcher.

use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::time::Duration;

use crate::pacing::PacingMode;
use crate::ValidationError;

/// Environment variable consulted when no key is passed explicitly.
pub const API_KEY_ENV: &str = "STOCKCRAWL_ALPHAVANTAGE_API_KEY";
/// Value shipped in sample configs. Never a usable key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_ALPHA_VANTAGE_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_SYMBOLS_FILE: &str = "Crawl_code/symbol.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "datack";
pub const DEFAULT_DATE_STAMP: &str = "2020-12-15";
pub const DEFAULT_DELAY: Duration = Duration::from_secs(15);
pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_owned())
    }

    /// Uses `explicit` when given, otherwise [`API_KEY_ENV`], otherwise an
    /// empty key that [`CrawlConfig::validate`] rejects.
    pub fn resolve(explicit: Option<String>) -> Self {
        explicit
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .map(Self::new)
            .unwrap_or_else(|| Self::new(""))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_API_KEY
    }

    fn check(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::MissingApiKey {
                env_var: API_KEY_ENV,
            });
        }
        if self.is_placeholder() {
            return Err(ValidationError::PlaceholderApiKey);
        }
        Ok(())
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub symbols_file: PathBuf,
    pub output_dir: PathBuf,
    /// Suffix baked into every output file name.
    pub date_stamp: String,
    /// Pause between consecutive requests under [`PacingMode::FixedDelay`].
    pub delay: Duration,
    /// Maximum number of symbols taken from the loaded list.
    pub limit: usize,
    pub timeout: Duration,
    pub pacing: PacingMode,
}

impl CrawlConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: String::from(DEFAULT_BASE_URL),
            symbols_file: PathBuf::from(DEFAULT_SYMBOLS_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            date_stamp: String::from(DEFAULT_DATE_STAMP),
            delay: DEFAULT_DELAY,
            limit: DEFAULT_LIMIT,
            timeout: DEFAULT_TIMEOUT,
            pacing: PacingMode::FixedDelay,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api_key.check()?;

        if self.timeout.is_zero() {
            return Err(ValidationError::ZeroValue { field: "timeout" });
        }
        if let PacingMode::Quota { per_minute: 0 } = self.pacing {
            return Err(ValidationError::ZeroValue {
                field: "quota_per_minute",
            });
        }

        let stamp = self.date_stamp.trim();
        if stamp.is_empty() {
            return Err(ValidationError::EmptyDateStamp);
        }
        if let Some(ch) = stamp
            .chars()
            .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_'))
        {
            return Err(ValidationError::DateStampInvalidChar { ch });
        }

        Ok(())
    }
}
