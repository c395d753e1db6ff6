//! Strictly serial batch runner.
//!
//! For every symbol, in list order: wait for the pacer, fetch once, write the
//! series if the fetch succeeded, and fold the result into a [`RunSummary`].
//! No fetch is retried and no failure stops the loop; a failed symbol is simply
//! skipped for this run.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classify::{FailureKind, FetchOutcome};
use crate::config::CrawlConfig;
use crate::fetcher::{AlphaVantageFetcher, SeriesFetcher};
use crate::http_client::HttpClient;
use crate::pacing::{pacer_for, Pacer};
use crate::symbols::{load_symbols, SymbolList};
use crate::writer::CsvSeriesWriter;
use crate::{CoreError, Symbol, WriteError};

/// Per-run tally. `succeeded + failed == total` once the run has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Folds one symbol's result into the tally.
    pub fn record(self, result: &Result<PathBuf, FailureKind>) -> Self {
        match result {
            Ok(_) => Self {
                succeeded: self.succeeded + 1,
                ..self
            },
            Err(_) => Self {
                failed: self.failed + 1,
                ..self
            },
        }
    }

    fn finish(self, total: usize) -> Self {
        Self { total, ..self }
    }
}

/// Progress callbacks for a run. Every method defaults to a no-op.
///
/// `position` is 0-based; reporters that show "[i/n]" add one.
pub trait BatchObserver: Send + Sync {
    /// Called by [`crawl`] once the symbol list is loaded, before the cap.
    fn on_symbols(&self, _list: &SymbolList, _path: &Path) {}
    fn on_start(&self, _total: usize) {}
    fn on_paced(&self, _position: usize, _waited: Duration) {}
    fn on_fetch(&self, _position: usize, _total: usize, _symbol: &Symbol) {}
    fn on_outcome(&self, _position: usize, _symbol: &Symbol, _outcome: &FetchOutcome) {}
    fn on_written(&self, _symbol: &Symbol, _path: &Path) {}
    fn on_write_failed(&self, _symbol: &Symbol, _error: &WriteError) {}
    fn on_finish(&self, _summary: &RunSummary) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

pub struct BatchRunner {
    fetcher: Arc<dyn SeriesFetcher>,
    pacer: Arc<dyn Pacer>,
    writer: CsvSeriesWriter,
    observer: Arc<dyn BatchObserver>,
}

impl BatchRunner {
    pub fn new(
        fetcher: Arc<dyn SeriesFetcher>,
        pacer: Arc<dyn Pacer>,
        writer: CsvSeriesWriter,
    ) -> Self {
        Self {
            fetcher,
            pacer,
            writer,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn BatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub async fn run(&self, symbols: &[Symbol]) -> RunSummary {
        let total = symbols.len();
        info!(total, "starting batch");
        self.observer.on_start(total);

        let mut summary = RunSummary::default();
        for (position, symbol) in symbols.iter().enumerate() {
            let waited = self.pacer.ready(position).await;
            if !waited.is_zero() {
                self.observer.on_paced(position, waited);
            }

            self.observer.on_fetch(position, total, symbol);
            let outcome = self.fetcher.fetch(symbol).await;
            self.observer.on_outcome(position, symbol, &outcome);

            let result = self.settle(symbol, outcome);
            summary = summary.record(&result);
        }

        let summary = summary.finish(total);
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "batch finished"
        );
        self.observer.on_finish(&summary);
        summary
    }

    fn settle(&self, symbol: &Symbol, outcome: FetchOutcome) -> Result<PathBuf, FailureKind> {
        if let Some(kind) = outcome.failure_kind() {
            warn!(
                %symbol,
                %kind,
                transient = kind.is_transient(),
                reason = outcome.reason().unwrap_or_default(),
                "fetch failed; skipping symbol"
            );
        }
        let series = outcome.into_series()?;

        match self.writer.write(symbol, &series) {
            Ok(path) => {
                info!(%symbol, rows = series.len(), path = %path.display(), "saved series");
                self.observer.on_written(symbol, &path);
                Ok(path)
            }
            Err(error) => {
                warn!(%symbol, %error, "failed to save series");
                self.observer.on_write_failed(symbol, &error);
                Err(FailureKind::Write)
            }
        }
    }
}

/// Runs a whole crawl from configuration: credential guard, symbol file,
/// cap, then the batch. Everything that can abort the run is checked before
/// the first request.
pub async fn crawl(
    config: &CrawlConfig,
    http_client: Arc<dyn HttpClient>,
    observer: Arc<dyn BatchObserver>,
) -> Result<RunSummary, CoreError> {
    config.validate()?;

    let symbols = load_symbols(&config.symbols_file)?;
    observer.on_symbols(&symbols, &config.symbols_file);
    let symbols = symbols.capped(config.limit);
    let runner = BatchRunner::new(
        Arc::new(AlphaVantageFetcher::with_http_client(http_client, config)),
        pacer_for(config.pacing, config.delay),
        CsvSeriesWriter::new(&config.output_dir, config.date_stamp.trim()),
    )
    .with_observer(observer);

    Ok(runner.run(&symbols.symbols).await)
}
