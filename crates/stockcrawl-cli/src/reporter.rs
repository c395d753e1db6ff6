//! Human-readable progress lines for a crawl.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use stockcrawl_core::{
    BatchObserver, CrawlConfig, FetchOutcome, PacingMode, RunSummary, Symbol, SymbolList,
    SymbolSource, WriteError,
};

/// Prints one line per step of the run to the wrapped writer.
pub struct ConsoleReporter {
    out: Mutex<Box<dyn Write + Send>>,
    pacing: String,
}

impl ConsoleReporter {
    pub fn new(out: Box<dyn Write + Send>, pacing: impl Into<String>) -> Self {
        Self {
            out: Mutex::new(out),
            pacing: pacing.into(),
        }
    }

    pub fn stdout(pacing: impl Into<String>) -> Self {
        Self::new(Box::new(std::io::stdout()), pacing)
    }

    pub fn stderr(pacing: impl Into<String>) -> Self {
        Self::new(Box::new(std::io::stderr()), pacing)
    }

    fn line(&self, text: std::fmt::Arguments<'_>) {
        // Best effort.
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_fmt(text);
            let _ = out.write_all(b"\n");
            let _ = out.flush();
        }
    }
}

impl BatchObserver for ConsoleReporter {
    fn on_symbols(&self, list: &SymbolList, path: &Path) {
        let count = list.symbols.len();
        match list.source {
            SymbolSource::File => {
                self.line(format_args!("Loaded {count} symbols from {}", path.display()));
            }
            SymbolSource::Defaults => self.line(format_args!(
                "Symbol file {} not found; using {count} default symbols",
                path.display()
            )),
        }
    }

    fn on_start(&self, total: usize) {
        self.line(format_args!("Processing {total} symbols ({})", self.pacing));
    }

    fn on_paced(&self, _position: usize, waited: Duration) {
        self.line(format_args!("  waited {:.1}s for rate limit", waited.as_secs_f64()));
    }

    fn on_fetch(&self, position: usize, total: usize, symbol: &Symbol) {
        self.line(format_args!("[{}/{total}] Fetching {symbol}...", position + 1));
    }

    fn on_outcome(&self, _position: usize, symbol: &Symbol, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Success(series) => {
                self.line(format_args!("  ok {symbol}: {} daily bars", series.len()));
            }
            FetchOutcome::QuotaExceeded => {
                self.line(format_args!("  skipped {symbol}: API call frequency exceeded"));
            }
            FetchOutcome::ApiError(message) => {
                self.line(format_args!("  skipped {symbol}: API error: {message}"));
            }
            FetchOutcome::TransportError(message) => {
                self.line(format_args!("  skipped {symbol}: request failed: {message}"));
            }
            FetchOutcome::Empty => {
                self.line(format_args!("  skipped {symbol}: no data returned"));
            }
        }
    }

    fn on_written(&self, _symbol: &Symbol, path: &Path) {
        self.line(format_args!("  saved {}", path.display()));
    }

    fn on_write_failed(&self, symbol: &Symbol, error: &WriteError) {
        self.line(format_args!("  failed to save {symbol}: {error}"));
    }

    fn on_finish(&self, summary: &RunSummary) {
        self.line(format_args!(
            "Done: {} succeeded, {} failed, {} total",
            summary.succeeded, summary.failed, summary.total
        ));
    }
}

/// Short description of the pacing in effect, used in the run header.
pub fn describe_pacing(config: &CrawlConfig) -> String {
    match config.pacing {
        PacingMode::FixedDelay => format!("{}s between requests", config.delay.as_secs()),
        PacingMode::Quota { per_minute } => {
            format!("at most {per_minute} requests per minute")
        }
    }
}
