use serde_json::{json, Value};
use stockcrawl_core::classify;
use stockcrawl_tests::*;

struct PayloadCase {
    name: &'static str,
    payload: Value,
    expected: Option<FailureKind>,
}

fn payload_cases() -> Vec<PayloadCase> {
    vec![
        PayloadCase {
            name: "series only",
            payload: json!({
                "Time Series (Daily)": {
                    "2024-01-02": { "1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "10" }
                }
            }),
            expected: None,
        },
        PayloadCase {
            name: "empty series object",
            payload: json!({ "Time Series (Daily)": {} }),
            expected: Some(FailureKind::Empty),
        },
        PayloadCase {
            name: "empty series beside metadata",
            payload: json!({ "Meta Data": { "2. Symbol": "IBM" }, "Time Series (Daily)": {} }),
            expected: Some(FailureKind::Empty),
        },
        PayloadCase {
            name: "error only",
            payload: json!({ "Error Message": "Invalid API call." }),
            expected: Some(FailureKind::Api),
        },
        PayloadCase {
            name: "error beside quota note",
            payload: json!({ "Error Message": "Invalid API call.", "Note": "slow down" }),
            expected: Some(FailureKind::Api),
        },
        PayloadCase {
            name: "error beside series",
            payload: json!({ "Error Message": "x", "Time Series (Daily)": {} }),
            expected: Some(FailureKind::Api),
        },
        PayloadCase {
            name: "note only",
            payload: json!({ "Note": "Thank you for using Alpha Vantage!" }),
            expected: Some(FailureKind::QuotaExceeded),
        },
        PayloadCase {
            name: "note beside series",
            payload: json!({ "Note": "slow down", "Time Series (Daily)": {} }),
            expected: Some(FailureKind::QuotaExceeded),
        },
        PayloadCase {
            name: "information notice",
            payload: json!({ "Information": "premium endpoint" }),
            expected: Some(FailureKind::QuotaExceeded),
        },
        PayloadCase {
            name: "empty object",
            payload: json!({}),
            expected: Some(FailureKind::Empty),
        },
        PayloadCase {
            name: "metadata only",
            payload: json!({ "Meta Data": { "2. Symbol": "IBM" } }),
            expected: Some(FailureKind::Empty),
        },
        PayloadCase {
            name: "array payload",
            payload: json!([1, 2, 3]),
            expected: Some(FailureKind::Empty),
        },
        PayloadCase {
            name: "null payload",
            payload: Value::Null,
            expected: Some(FailureKind::Empty),
        },
    ]
}

#[test]
fn every_payload_maps_to_exactly_the_expected_outcome() {
    for case in payload_cases() {
        let outcome = classify(&case.payload);
        assert_eq!(
            outcome.failure_kind(),
            case.expected,
            "case '{}': outcome {outcome:?}",
            case.name
        );
        assert_eq!(
            matches!(outcome, FetchOutcome::Success(_)),
            case.expected.is_none(),
            "case '{}': success flag",
            case.name
        );
    }
}

#[test]
fn classification_is_deterministic() {
    for case in payload_cases() {
        assert_eq!(
            classify(&case.payload),
            classify(&case.payload),
            "case '{}'",
            case.name
        );
    }
}

#[test]
fn success_preserves_every_date_and_field_text() {
    let payload = json!({
        "Time Series (Daily)": {
            "2023-12-29": { "1. open": "193.9000", "2. high": "194.4000", "3. low": "191.7250", "4. close": "192.5300", "5. volume": "42672148" },
            "2024-01-02": { "1. open": "187.1500", "2. high": "188.4400", "3. low": "183.8850", "4. close": "185.6400", "5. volume": "82488674" }
        }
    });

    let FetchOutcome::Success(series) = classify(&payload) else {
        panic!("expected a series");
    };
    assert_eq!(series.len(), 2);

    let bar = series.get("2023-12-29").expect("date kept verbatim");
    assert_eq!(bar.open, "193.9000");
    assert_eq!(bar.high, "194.4000");
    assert_eq!(bar.low, "191.7250");
    assert_eq!(bar.close, "192.5300");
    assert_eq!(bar.volume, "42672148");
}

#[test]
fn api_error_carries_the_upstream_message() {
    let payload = json!({ "Error Message": "Invalid API call. Please retry." });
    assert_eq!(
        classify(&payload),
        FetchOutcome::ApiError(String::from("Invalid API call. Please retry."))
    );
}

#[tokio::test]
async fn fetcher_never_panics_and_maps_every_transport_state() {
    let cases = [
        (
            "timeout",
            Err(HttpError::new("request timeout: deadline elapsed")),
            Some(FailureKind::Transport),
        ),
        (
            "server error",
            Ok(HttpResponse {
                status: 503,
                body: String::from("unavailable"),
            }),
            Some(FailureKind::Transport),
        ),
        (
            "malformed body",
            Ok(HttpResponse::ok_json("<html>not json</html>")),
            Some(FailureKind::Transport),
        ),
        (
            "quota note",
            Ok(HttpResponse::ok_json(r#"{"Note":"slow down"}"#)),
            Some(FailureKind::QuotaExceeded),
        ),
        (
            "empty series",
            Ok(HttpResponse::ok_json(r#"{"Time Series (Daily)":{}}"#)),
            Some(FailureKind::Empty),
        ),
        (
            "series",
            Ok(HttpResponse::ok_json(
                r#"{"Time Series (Daily)":{"2024-01-02":{"1. open":"1.0"}}}"#,
            )),
            None,
        ),
    ];
    let symbol = Symbol::parse("IBM").expect("valid symbol");

    for (name, answer, expected) in cases {
        let client = Arc::new(ScriptedHttpClient::answering(answer));
        let fetcher = AlphaVantageFetcher::new(client.clone(), ApiKey::new("contract-key"));

        let outcome = fetcher.fetch(&symbol).await;
        assert_eq!(outcome.failure_kind(), expected, "case '{name}'");

        let requests = client.requests();
        assert_eq!(requests.len(), 1, "case '{name}': exactly one attempt");
        let request = &requests[0];
        assert_eq!(request.query_value("function"), Some("TIME_SERIES_DAILY"));
        assert_eq!(request.query_value("symbol"), Some("IBM"));
        assert_eq!(request.query_value("apikey"), Some("contract-key"));
        assert_eq!(request.query_value("outputsize"), Some("full"));
    }
}
