use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::classify::{classify, FetchOutcome};
use crate::config::{ApiKey, CrawlConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::http_client::{HttpClient, HttpRequest};
use crate::Symbol;

/// Source of one daily series per symbol.
pub trait SeriesFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>>;
}

/// `TIME_SERIES_DAILY` fetcher. One GET per call, no retries, no state kept
/// between calls.
#[derive(Clone)]
pub struct AlphaVantageFetcher {
    http_client: Arc<dyn HttpClient>,
    api_key: ApiKey,
    base_url: String,
    timeout: Duration,
}

impl AlphaVantageFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: ApiKey) -> Self {
        Self {
            http_client,
            api_key,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: &CrawlConfig) -> Self {
        Self::new(http_client, config.api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn request_for(&self, symbol: &Symbol) -> HttpRequest {
        HttpRequest::get(&self.base_url)
            .with_query("function", "TIME_SERIES_DAILY")
            .with_query("symbol", symbol.as_str())
            .with_query("apikey", self.api_key.expose())
            .with_query("outputsize", "full")
            .with_query("datatype", "json")
            .with_header("accept", "application/json")
            .with_timeout(self.timeout)
    }

    async fn fetch_daily(&self, symbol: &Symbol) -> FetchOutcome {
        debug!(%symbol, base_url = %self.base_url, "requesting daily series");

        let response = match self.http_client.execute(self.request_for(symbol)).await {
            Ok(response) => response,
            Err(error) => return FetchOutcome::TransportError(error.message().to_owned()),
        };

        if !response.is_success() {
            return FetchOutcome::TransportError(format!(
                "upstream returned status {}",
                response.status
            ));
        }

        match serde_json::from_str::<serde_json::Value>(&response.body) {
            Ok(payload) => classify(&payload),
            Err(error) => FetchOutcome::TransportError(format!("malformed response body: {error}")),
        }
    }
}

impl SeriesFetcher for AlphaVantageFetcher {
    fn fetch<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>> {
        Box::pin(self.fetch_daily(symbol))
    }
}
