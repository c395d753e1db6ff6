//! Classification of decoded `TIME_SERIES_DAILY` payloads.
//!
//! The API answers almost every request with HTTP 200 and a JSON object, so
//! failures have to be read out of the body. A payload may carry several
//! indicator keys at once; the checks below run in a fixed order and the
//! first match wins:
//!
//! | Order | Key | Outcome |
//! |-------|-----|---------|
//! | 1 | `Error Message` | [`FetchOutcome::ApiError`] |
//! | 2 | `Note` / `Information` | [`FetchOutcome::QuotaExceeded`] |
//! | 3 | non-empty `Time Series (Daily)` | [`FetchOutcome::Success`] |
//! | 4 | anything else | [`FetchOutcome::Empty`] |

use std::fmt::{Display, Formatter};

use serde_json::{Map, Value};

use crate::{DailyBar, TimeSeries};

pub const ERROR_KEY: &str = "Error Message";
pub const QUOTA_KEYS: [&str; 2] = ["Note", "Information"];
pub const SERIES_KEY: &str = "Time Series (Daily)";

const OPEN_KEY: &str = "1. open";
const HIGH_KEY: &str = "2. high";
const LOW_KEY: &str = "3. low";
const CLOSE_KEY: &str = "4. close";
const VOLUME_KEY: &str = "5. volume";

/// Result of a single fetch attempt. Exactly one variant per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(TimeSeries),
    QuotaExceeded,
    ApiError(String),
    TransportError(String),
    Empty,
}

impl FetchOutcome {
    /// Failure category, or `None` for [`FetchOutcome::Success`].
    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success(_) => None,
            Self::QuotaExceeded => Some(FailureKind::QuotaExceeded),
            Self::ApiError(_) => Some(FailureKind::Api),
            Self::TransportError(_) => Some(FailureKind::Transport),
            Self::Empty => Some(FailureKind::Empty),
        }
    }

    /// Upstream or transport message carried by the failure, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::ApiError(reason) | Self::TransportError(reason) => Some(reason),
            Self::Success(_) | Self::QuotaExceeded | Self::Empty => None,
        }
    }

    pub fn into_series(self) -> Result<TimeSeries, FailureKind> {
        match self {
            Self::Success(series) => Ok(series),
            Self::QuotaExceeded => Err(FailureKind::QuotaExceeded),
            Self::ApiError(_) => Err(FailureKind::Api),
            Self::TransportError(_) => Err(FailureKind::Transport),
            Self::Empty => Err(FailureKind::Empty),
        }
    }
}

/// Why a symbol was counted as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Transport,
    QuotaExceeded,
    Api,
    Empty,
    Write,
}

impl FailureKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Api => "api",
            Self::Empty => "empty",
            Self::Write => "write",
        }
    }

    /// Whether a later attempt could plausibly succeed. The batch runner does
    /// not retry either way; this only labels the failure.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Transport | Self::QuotaExceeded)
    }
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a decoded response body. Pure and total.
pub fn classify(payload: &Value) -> FetchOutcome {
    let Some(object) = payload.as_object() else {
        return FetchOutcome::Empty;
    };

    if let Some(message) = object.get(ERROR_KEY) {
        return FetchOutcome::ApiError(value_text(message));
    }

    if QUOTA_KEYS.iter().any(|key| object.contains_key(*key)) {
        return FetchOutcome::QuotaExceeded;
    }

    let Some(entries) = object.get(SERIES_KEY).and_then(Value::as_object) else {
        return FetchOutcome::Empty;
    };
    let series = parse_series(entries);
    if series.is_empty() {
        return FetchOutcome::Empty;
    }
    FetchOutcome::Success(series)
}

fn parse_series(entries: &Map<String, Value>) -> TimeSeries {
    entries
        .iter()
        .map(|(date, fields)| (date.clone(), parse_bar(fields)))
        .collect()
}

fn parse_bar(fields: &Value) -> DailyBar {
    let field = |key: &str| fields.get(key).map(value_text).unwrap_or_default();
    DailyBar::new(
        field(OPEN_KEY),
        field(HIGH_KEY),
        field(LOW_KEY),
        field(CLOSE_KEY),
        field(VOLUME_KEY),
    )
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_message_wins_over_every_other_key() {
        let payload = json!({
            "Error Message": "Invalid API call.",
            "Note": "Thank you for using Alpha Vantage!",
            "Time Series (Daily)": { "2024-01-02": { "1. open": "1.0" } }
        });

        assert_eq!(
            classify(&payload),
            FetchOutcome::ApiError(String::from("Invalid API call."))
        );
    }

    #[test]
    fn note_and_information_both_signal_quota() {
        let note = json!({
            "Note": "5 calls per minute",
            "Time Series (Daily)": { "2024-01-02": { "1. open": "1.0" } }
        });
        let information = json!({ "Information": "rate limit reached" });

        assert_eq!(classify(&note), FetchOutcome::QuotaExceeded);
        assert_eq!(classify(&information), FetchOutcome::QuotaExceeded);
    }

    #[test]
    fn series_fields_map_to_bar_attributes() {
        let payload = json!({
            "Meta Data": { "2. Symbol": "IBM" },
            "Time Series (Daily)": {
                "2024-01-02": {
                    "1. open": "162.8300",
                    "2. high": "163.2900",
                    "3. low": "160.2500",
                    "4. close": "161.5000",
                    "5. volume": "3779456"
                }
            }
        });

        let FetchOutcome::Success(series) = classify(&payload) else {
            panic!("expected success");
        };
        let bar = series.get("2024-01-02").expect("date preserved");
        assert_eq!(
            bar,
            &DailyBar::new("162.8300", "163.2900", "160.2500", "161.5000", "3779456")
        );
    }

    #[test]
    fn missing_and_odd_sub_fields_degrade_to_text() {
        let payload = json!({
            "Time Series (Daily)": {
                "2024-01-02": { "1. open": "1.5", "5. volume": 42, "4. close": null },
                "2024-01-01": "not an object"
            }
        });

        let FetchOutcome::Success(series) = classify(&payload) else {
            panic!("expected success");
        };
        assert_eq!(series.len(), 2);
        assert_eq!(
            series.get("2024-01-02"),
            Some(&DailyBar::new("1.5", "", "", "", "42"))
        );
        assert_eq!(series.get("2024-01-01"), Some(&DailyBar::default()));
    }

    #[test]
    fn anything_else_is_empty() {
        assert_eq!(classify(&json!({})), FetchOutcome::Empty);
        assert_eq!(classify(&json!({ "Meta Data": {} })), FetchOutcome::Empty);
        assert_eq!(classify(&json!({ "Time Series (Daily)": [] })), FetchOutcome::Empty);
        assert_eq!(classify(&json!({ "Time Series (Daily)": {} })), FetchOutcome::Empty);
        assert_eq!(classify(&json!(["Error Message"])), FetchOutcome::Empty);
    }

    #[test]
    fn transient_kinds_are_transport_and_quota() {
        assert!(FailureKind::Transport.is_transient());
        assert!(FailureKind::QuotaExceeded.is_transient());
        assert!(!FailureKind::Api.is_transient());
        assert!(!FailureKind::Empty.is_transient());
        assert!(!FailureKind::Write.is_transient());
        assert_eq!(FetchOutcome::Empty.failure_kind(), Some(FailureKind::Empty));
        assert_eq!(FetchOutcome::Success(TimeSeries::new()).failure_kind(), None);
    }

    #[test]
    fn into_series_matches_failure_kind() {
        let outcomes = [
            FetchOutcome::QuotaExceeded,
            FetchOutcome::ApiError(String::from("bad symbol")),
            FetchOutcome::TransportError(String::from("timeout")),
            FetchOutcome::Empty,
        ];
        for outcome in outcomes {
            let kind = outcome.failure_kind();
            assert_eq!(outcome.into_series().err(), kind);
        }

        let reason = FetchOutcome::ApiError(String::from("bad symbol"));
        assert_eq!(reason.reason(), Some("bad symbol"));
        assert_eq!(FetchOutcome::QuotaExceeded.reason(), None);
    }
}
