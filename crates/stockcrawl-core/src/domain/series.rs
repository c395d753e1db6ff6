use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One trading day. Every field keeps the upstream decimal text verbatim;
/// an absent field is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl DailyBar {
    pub fn new(
        open: impl Into<String>,
        high: impl Into<String>,
        low: impl Into<String>,
        close: impl Into<String>,
        volume: impl Into<String>,
    ) -> Self {
        Self {
            open: open.into(),
            high: high.into(),
            low: low.into(),
            close: close.into(),
            volume: volume.into(),
        }
    }
}

/// Daily bars keyed by their date string.
///
/// Keys are unique. Iteration order is an implementation detail; callers that
/// need an order (the CSV writer) impose it themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    bars: BTreeMap<String, DailyBar>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a bar, replacing any bar already stored for `date`.
    pub fn insert(&mut self, date: impl Into<String>, bar: DailyBar) -> Option<DailyBar> {
        self.bars.insert(date.into(), bar)
    }

    pub fn get(&self, date: &str) -> Option<&DailyBar> {
        self.bars.get(date)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Entries ordered by date key, newest first for `YYYY-MM-DD` keys.
    pub fn iter_descending(&self) -> impl Iterator<Item = (&str, &DailyBar)> {
        self.bars.iter().rev().map(|(date, bar)| (date.as_str(), bar))
    }
}

impl FromIterator<(String, DailyBar)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (String, DailyBar)>>(iter: I) -> Self {
        Self {
            bars: iter.into_iter().collect(),
        }
    }
}
