//! # Quote Fetch Orchestrator
//!
//! Every public operation runs the same pipeline:
//!
//! ```text
//! key check ──no key──────────────────────────────┐
//!     │                                           ▼
//!     └─▶ fetch ─▶ validate ─▶ normalize ─▶ live  sample (fallback catalog)
//!                    │            │                ▲
//!                    └────────────┴── any error ───┘
//! ```
//!
//! Provider failures never escape: they are logged with the endpoint and
//! symbol, then replaced by sample data. Calls within one operation are
//! issued one after another.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::error::ProviderError;
use crate::fallback::FallbackCatalog;
use crate::http_client::HttpClient;
use crate::provider::normalize::{
    normalize_market_index, normalize_news, normalize_quote, select_series,
};
use crate::provider::AlphaVantageClient;
use crate::{
    DashboardConfig, Fetched, HistoricalPoint, IndexList, MarketIndex, NewsItem, Quote,
    StockList, Symbol, Timeframe,
};

pub const NO_KEY_MESSAGE: &str =
    "Using sample data. Please provide an Alpha Vantage API key to fetch real-time data.";
pub const STOCKS_PROBE_OK_MESSAGE: &str = "Using sample data. To fetch real-time data for multiple stocks, implement batch processing with API rate limits in mind.";
pub const MARKET_PROBE_OK_MESSAGE: &str = "Using sample data. To fetch real-time market indices, implement batch processing with API rate limits in mind.";
pub const PROBE_FAILED_MESSAGE: &str = "Using sample data due to API limitations.";

/// Wall clock used for relative news times, intraday filtering and walk dates.
pub type Clock = fn() -> OffsetDateTime;

/// Dashboard data service shared by all request handlers.
#[derive(Clone)]
pub struct MarketDataService {
    provider: Option<AlphaVantageClient>,
    catalog: Arc<FallbackCatalog>,
    sample_seed: Option<u64>,
    clock: Clock,
}

impl MarketDataService {
    /// The provider client is only built when `config` carries a key.
    pub fn new(
        config: DashboardConfig,
        http_client: Arc<dyn HttpClient>,
        catalog: Arc<FallbackCatalog>,
    ) -> Self {
        let DashboardConfig {
            api_key,
            base_url,
            sample_seed,
            provider_timeout,
        } = config;

        let provider = api_key.map(|key| {
            AlphaVantageClient::new(http_client, base_url, key).with_timeout(provider_timeout)
        });

        Self {
            provider,
            catalog,
            sample_seed,
            clock: OffsetDateTime::now_utc,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Live quote merged with the company overview, else the catalog quote.
    pub async fn quote(&self, symbol: &Symbol) -> Fetched<Quote> {
        match self.fetch_quote(symbol).await {
            Ok(quote) => Fetched::live(quote),
            Err(error) => {
                log_fallback("stocks", Some(symbol.as_str()), &error);
                Fetched::sample(self.catalog.quote(symbol))
            }
        }
    }

    /// Authored quotes with a message describing why live data is not shown.
    pub async fn popular_stocks(&self) -> StockList {
        let message = match (&self.provider, self.catalog.first_quote_symbol()) {
            (None, _) => NO_KEY_MESSAGE,
            (Some(_), Some(probe)) => match self.fetch_quote(&probe).await {
                Ok(_) => STOCKS_PROBE_OK_MESSAGE,
                Err(error) => {
                    log_fallback("stocks", Some(probe.as_str()), &error);
                    PROBE_FAILED_MESSAGE
                }
            },
            (Some(_), None) => PROBE_FAILED_MESSAGE,
        };

        StockList {
            stocks: self.catalog.quotes.clone(),
            message: String::from(message),
        }
    }

    /// Ascending price series, else a random walk.
    pub async fn historical(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
    ) -> Fetched<Vec<HistoricalPoint>> {
        match self.fetch_historical(symbol, timeframe).await {
            Ok(points) => Fetched::live(points),
            Err(error) => {
                log_fallback("stocks/historical", Some(symbol.as_str()), &error);
                let seed = self.sample_seed.unwrap_or_else(|| fastrand::u64(..));
                Fetched::sample(
                    self.catalog
                        .generate(symbol, timeframe, (self.clock)(), seed),
                )
            }
        }
    }

    /// Up to ten headlines, for one ticker or the whole market.
    pub async fn news(&self, symbol: Option<&Symbol>) -> Fetched<Vec<NewsItem>> {
        match self.fetch_news(symbol).await {
            Ok(items) => Fetched::live(items),
            Err(error) => {
                log_fallback("news", symbol.map(Symbol::as_str), &error);
                Fetched::sample(self.catalog.news(symbol))
            }
        }
    }

    /// One index through its ETF proxy.
    pub async fn market_index(&self, symbol: &str, name: &str) -> Fetched<MarketIndex> {
        match self.fetch_market_index(symbol, name).await {
            Ok(index) => Fetched::live(index),
            Err(error) => {
                log_fallback("market", Some(symbol), &error);
                Fetched::sample(self.catalog.index(symbol, name))
            }
        }
    }

    /// Authored indices with a message; probes the first index when a key is set.
    pub async fn market_overview(&self) -> IndexList {
        let message = match (&self.provider, self.catalog.indices.first()) {
            (None, _) => NO_KEY_MESSAGE,
            (Some(_), Some(probe)) => match self.fetch_market_index(&probe.symbol, &probe.name).await
            {
                Ok(_) => MARKET_PROBE_OK_MESSAGE,
                Err(error) => {
                    log_fallback("market", Some(probe.symbol.as_str()), &error);
                    PROBE_FAILED_MESSAGE
                }
            },
            (Some(_), None) => PROBE_FAILED_MESSAGE,
        };

        IndexList {
            indices: self.catalog.indices.clone(),
            message: String::from(message),
        }
    }

    fn provider(&self) -> Result<&AlphaVantageClient, ProviderError> {
        self.provider
            .as_ref()
            .ok_or(ProviderError::MissingCredential)
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, ProviderError> {
        let provider = self.provider()?;
        let quote = provider.global_quote(symbol).await?;
        let overview = provider.company_overview(symbol).await?;
        normalize_quote(symbol, quote, overview)
    }

    async fn fetch_historical(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
    ) -> Result<Vec<HistoricalPoint>, ProviderError> {
        let series = self.provider()?.time_series(symbol, timeframe).await?;
        let points = select_series(series, timeframe, (self.clock)().date())?;
        if points.is_empty() {
            return Err(ProviderError::no_data(symbol.as_str()));
        }
        Ok(points)
    }

    async fn fetch_news(&self, symbol: Option<&Symbol>) -> Result<Vec<NewsItem>, ProviderError> {
        let feed = self.provider()?.news_sentiment(symbol).await?;
        Ok(normalize_news(feed, (self.clock)()))
    }

    async fn fetch_market_index(
        &self,
        symbol: &str,
        name: &str,
    ) -> Result<MarketIndex, ProviderError> {
        let proxy = Symbol::parse(symbol).map_err(|_| ProviderError::no_data(symbol))?;
        let quote = self.provider()?.global_quote(&proxy).await?;
        normalize_market_index(name, symbol, &quote)
    }
}

fn log_fallback(endpoint: &'static str, symbol: Option<&str>, error: &ProviderError) {
    let symbol = symbol.unwrap_or("-");
    match error {
        ProviderError::MissingCredential => {
            tracing::debug!(endpoint, symbol, "no provider key configured, serving sample data");
        }
        _ => {
            tracing::warn!(
                endpoint,
                symbol,
                code = error.code(),
                error = %error,
                "provider call failed, serving sample data"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use time::macros::datetime;

    use super::*;
    use crate::http_client::{HttpError, HttpRequest, HttpResponse};
    use crate::DataOrigin;

    struct FixedHttpClient {
        response: Result<HttpResponse, HttpError>,
        calls: Mutex<usize>,
    }

    impl FixedHttpClient {
        fn new(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> usize {
            *self.calls.lock().expect("call counter should not be poisoned")
        }
    }

    impl HttpClient for FixedHttpClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            *self.calls.lock().expect("call counter should not be poisoned") += 1;
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn fixed_now() -> OffsetDateTime {
        datetime!(2024-06-03 15:00 UTC)
    }

    fn service(http: Arc<FixedHttpClient>, api_key: Option<&str>) -> MarketDataService {
        let config = DashboardConfig::new()
            .with_api_key(api_key.map(str::to_owned))
            .with_sample_seed(Some(7));
        MarketDataService::new(config, http, Arc::new(FallbackCatalog::sample()))
            .with_clock(fixed_now)
    }

    fn symbol(value: &str) -> Symbol {
        Symbol::parse(value).expect("valid symbol")
    }

    #[tokio::test]
    async fn no_key_never_touches_the_transport() {
        let http = FixedHttpClient::new(Ok(HttpResponse::ok_json("{}")));
        let service = service(http.clone(), None);

        let quote = service.quote(&symbol("AAPL")).await;
        let list = service.popular_stocks().await;
        let overview = service.market_overview().await;

        assert_eq!(quote.origin, DataOrigin::Sample);
        assert_eq!(quote.data.price, 187.68);
        assert_eq!(list.message, NO_KEY_MESSAGE);
        assert_eq!(overview.message, NO_KEY_MESSAGE);
        assert_eq!(http.calls(), 0);
    }

    #[tokio::test]
    async fn transport_failure_falls_back_to_generic_quote() {
        let http = FixedHttpClient::new(Err(HttpError::new("connection refused")));
        let service = service(http, Some("key"));

        let quote = service.quote(&symbol("ZZZZ")).await;
        assert!(!quote.is_live());
        assert_eq!(quote.data.name, "ZZZZ Inc.");
    }

    #[tokio::test]
    async fn failed_probe_reports_api_limitations() {
        let http = FixedHttpClient::new(Ok(HttpResponse::new(503, "")));
        let service = service(http.clone(), Some("key"));

        assert_eq!(service.popular_stocks().await.message, PROBE_FAILED_MESSAGE);
        assert_eq!(service.market_overview().await.message, PROBE_FAILED_MESSAGE);
        assert_eq!(http.calls(), 2);
    }

    #[tokio::test]
    async fn historical_fallback_uses_configured_seed() {
        let http = FixedHttpClient::new(Ok(HttpResponse::ok_json("{}")));
        let service = service(http, Some("key"));

        let first = service.historical(&symbol("TSLA"), Timeframe::OneMonth).await;
        let second = service.historical(&symbol("TSLA"), Timeframe::OneMonth).await;

        assert_eq!(first.origin, DataOrigin::Sample);
        assert_eq!(first.data, second.data);
        assert_eq!(first.data.len(), 22);
        assert_eq!(
            first.data.last().map(|point| point.date.as_str()),
            Some("2024-06-02")
        );
    }
}
