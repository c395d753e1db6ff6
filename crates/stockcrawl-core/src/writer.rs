//! CSV persistence for fetched series.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use csv::Writer;
use tracing::debug;

use crate::config::{DEFAULT_DATE_STAMP, DEFAULT_OUTPUT_DIR};
use crate::{Symbol, TimeSeries, WriteError};

pub const HEADER: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// Writes one CSV file per symbol beneath a fixed output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSeriesWriter {
    output_dir: PathBuf,
    date_stamp: String,
}

impl Default for CsvSeriesWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR, DEFAULT_DATE_STAMP)
    }
}

impl CsvSeriesWriter {
    pub fn new(output_dir: impl Into<PathBuf>, date_stamp: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            date_stamp: date_stamp.into(),
        }
    }

    /// `{output_dir}/stock_market_data-{SYMBOL}_{date_stamp}.csv`, with
    /// characters that are not allowed in file names replaced by `_`.
    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.output_dir.join(format!(
            "stock_market_data-{}_{}.csv",
            file_name_component(symbol.as_str()),
            self.date_stamp
        ))
    }

    /// Writes `series` newest date first, replacing any previous file for
    /// `symbol`. Creates the output directory on first use.
    pub fn write(&self, symbol: &Symbol, series: &TimeSeries) -> Result<PathBuf, WriteError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| WriteError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.path_for(symbol);
        let csv_error = |source: csv::Error| WriteError::Csv {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(|source| csv_error(source.into()))?;
        let mut writer = Writer::from_writer(BufWriter::new(file));

        writer.write_record(HEADER).map_err(csv_error)?;
        for (date, bar) in series.iter_descending() {
            writer
                .write_record([
                    date,
                    bar.open.as_str(),
                    bar.high.as_str(),
                    bar.low.as_str(),
                    bar.close.as_str(),
                    bar.volume.as_str(),
                ])
                .map_err(csv_error)?;
        }

        let flush_error = |source: std::io::Error| WriteError::Flush {
            path: path.clone(),
            source,
        };
        writer.flush().map_err(flush_error)?;
        let mut buffered = writer
            .into_inner()
            .map_err(|error| flush_error(error.into_error()))?;
        buffered.flush().map_err(flush_error)?;

        debug!(%symbol, rows = series.len(), path = %path.display(), "series written");
        Ok(path)
    }
}

fn file_name_component(symbol: &str) -> String {
    symbol
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect()
}
