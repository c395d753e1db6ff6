//! # Stockcrawl Core
//!
//! Rate-limited batch download of daily price history from Alpha Vantage's
//! `TIME_SERIES_DAILY` endpoint into one CSV file per symbol.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`batch`] | Serial batch runner, run summary, progress observer |
//! | [`classify`] | Response classification into [`FetchOutcome`] |
//! | [`config`] | Run configuration and credential guard |
//! | [`domain`] | Symbol, daily bar, time series |
//! | [`error`] | Core error types |
//! | [`fetcher`] | One request per symbol against the API |
//! | [`http_client`] | HTTP client abstraction |
//! | [`pacing`] | Fixed-delay and token-bucket admission control |
//! | [`symbols`] | Symbol file loading and default list |
//! | [`writer`] | CSV output |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │  BatchRunner    │────▶│ Pacer            │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Fetcher         │────▶│ HTTP Client      │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ classify        │     │ CsvSeriesWriter  │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockcrawl_core::{crawl, ApiKey, CrawlConfig, NoopObserver, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CrawlConfig::new(ApiKey::resolve(None));
//!     let summary = crawl(&config, Arc::new(ReqwestHttpClient::new()), Arc::new(NoopObserver)).await?;
//!     println!("{}/{} succeeded", summary.succeeded, summary.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Security
//!
//! - The API key is never logged; [`ApiKey`] redacts itself in `Debug` output
//! - A missing or placeholder key aborts before any request is sent

pub mod batch;
pub mod classify;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod pacing;
pub mod symbols;
pub mod writer;

pub use batch::{crawl, BatchObserver, BatchRunner, NoopObserver, RunSummary};
pub use classify::{classify, FailureKind, FetchOutcome};
pub use config::{ApiKey, CrawlConfig, API_KEY_ENV, PLACEHOLDER_API_KEY};
pub use domain::{DailyBar, Symbol, TimeSeries};
pub use error::{CoreError, ValidationError, WriteError};
pub use fetcher::{AlphaVantageFetcher, SeriesFetcher};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use pacing::{pacer_for, FixedDelay, Pacer, PacingMode, QuotaPacer};
pub use symbols::{load_symbols, SymbolList, SymbolSource, DEFAULT_SYMBOLS};
pub use writer::CsvSeriesWriter;
