//! Alpha Vantage query construction and typed payloads.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ProviderError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::provider::validator::{validate_response, ValidatedPayload};
use crate::{SeriesKind, Symbol, Timeframe};

pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Authenticated Alpha Vantage client. Exists only when a key is configured.
#[derive(Clone)]
pub struct AlphaVantageClient {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl AlphaVantageClient {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// `GLOBAL_QUOTE`; an empty `Global Quote` object means the symbol is unknown.
    pub async fn global_quote(&self, symbol: &Symbol) -> Result<GlobalQuote, ProviderError> {
        let payload = self
            .query(&[("function", "GLOBAL_QUOTE"), ("symbol", symbol.as_str())])
            .await?;
        let response: GlobalQuoteResponse = decode(payload.value)?;

        response
            .quote
            .filter(|quote| quote.symbol.as_deref().is_some_and(|s| !s.is_empty()))
            .ok_or_else(|| ProviderError::no_data(symbol.as_str()))
    }

    /// `OVERVIEW`; unknown symbols come back as `{}`, which decodes to all-`None`.
    pub async fn company_overview(
        &self,
        symbol: &Symbol,
    ) -> Result<CompanyOverview, ProviderError> {
        let payload = self
            .query(&[("function", "OVERVIEW"), ("symbol", symbol.as_str())])
            .await?;
        decode(payload.value)
    }

    pub async fn time_series(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
    ) -> Result<TimeSeries, ProviderError> {
        let symbol = symbol.as_str();
        let params = match timeframe.series() {
            SeriesKind::Intraday => vec![
                ("function", "TIME_SERIES_INTRADAY"),
                ("symbol", symbol),
                ("interval", "5min"),
                ("outputsize", "compact"),
            ],
            SeriesKind::DailyCompact => vec![
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", "compact"),
            ],
            SeriesKind::DailyFull => vec![
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", "full"),
            ],
        };

        let payload = self.query(&params).await?;
        decode(payload.value)
    }

    /// `NEWS_SENTIMENT`, optionally filtered to one ticker.
    pub async fn news_sentiment(
        &self,
        symbol: Option<&Symbol>,
    ) -> Result<Vec<FeedItem>, ProviderError> {
        let mut params = vec![("function", "NEWS_SENTIMENT")];
        if let Some(symbol) = symbol {
            params.push(("tickers", symbol.as_str()));
        }

        let payload = self.query(&params).await?;
        let feed = match payload.value.get("feed") {
            Some(Value::Array(items)) => items.clone(),
            _ => {
                let key = symbol.map_or("market", Symbol::as_str);
                return Err(ProviderError::no_data(key));
            }
        };

        decode(Value::Array(feed))
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<ValidatedPayload, ProviderError> {
        let request = HttpRequest::get(self.url(params))
            .with_header("accept", "application/json")
            .with_timeout(self.timeout);
        tracing::debug!(url = %request.redacted_url(), "querying provider");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| ProviderError::Transport(error.message().to_owned()))?;

        validate_response(&response)
    }

    fn url(&self, params: &[(&str, &str)]) -> String {
        let mut query = params
            .iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>();
        query.push(format!("apikey={}", urlencoding::encode(&self.api_key)));

        format!("{}?{}", self.base_url, query.join("&"))
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ProviderError> {
    serde_json::from_value(value).map_err(|error| {
        tracing::debug!(%error, "provider payload did not match the expected shape");
        ProviderError::MalformedPayload
    })
}

#[derive(Debug, Clone, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    quote: Option<GlobalQuote>,
}

/// `GLOBAL_QUOTE` body. Every value arrives as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol", default)]
    pub symbol: Option<String>,
    #[serde(rename = "02. open", default)]
    pub open: Option<String>,
    #[serde(rename = "03. high", default)]
    pub high: Option<String>,
    #[serde(rename = "04. low", default)]
    pub low: Option<String>,
    #[serde(rename = "05. price", default)]
    pub price: Option<String>,
    #[serde(rename = "06. volume", default)]
    pub volume: Option<String>,
    #[serde(rename = "07. latest trading day", default)]
    pub latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close", default)]
    pub previous_close: Option<String>,
    #[serde(rename = "09. change", default)]
    pub change: Option<String>,
    #[serde(rename = "10. change percent", default)]
    pub change_percent: Option<String>,
}

/// Subset of the `OVERVIEW` body used by the quote transform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanyOverview {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Exchange", default)]
    pub exchange: Option<String>,
    #[serde(rename = "Currency", default)]
    pub currency: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "Sector", default)]
    pub sector: Option<String>,
    #[serde(rename = "Industry", default)]
    pub industry: Option<String>,
    #[serde(rename = "MarketCapitalization", default)]
    pub market_capitalization: Option<String>,
    #[serde(rename = "PERatio", default)]
    pub pe_ratio: Option<String>,
    #[serde(rename = "DividendYield", default)]
    pub dividend_yield: Option<String>,
    #[serde(rename = "EPS", default)]
    pub eps: Option<String>,
    #[serde(rename = "ProfitMargin", default)]
    pub profit_margin: Option<String>,
    #[serde(rename = "Beta", default)]
    pub beta: Option<String>,
    #[serde(rename = "52WeekHigh", default)]
    pub week_52_high: Option<String>,
    #[serde(rename = "52WeekLow", default)]
    pub week_52_low: Option<String>,
    #[serde(rename = "50DayMovingAverage", default)]
    pub moving_average_50: Option<String>,
    #[serde(rename = "200DayMovingAverage", default)]
    pub moving_average_200: Option<String>,
}

/// Intraday or daily series; only the close is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TimeSeries {
    #[serde(rename = "Time Series (5min)", default)]
    pub intraday: Option<BTreeMap<String, SeriesEntry>>,
    #[serde(rename = "Time Series (Daily)", default)]
    pub daily: Option<BTreeMap<String, SeriesEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeriesEntry {
    #[serde(rename = "4. close")]
    pub close: String,
}

/// One `NEWS_SENTIMENT` feed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedItem {
    pub title: String,
    pub url: String,
    pub time_published: String,
    pub summary: Option<String>,
    pub banner_image: Option<String>,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    struct CannedHttpClient {
        body: String,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl CannedHttpClient {
        fn new(body: &str) -> Arc<Self> {
            Arc::new(Self {
                body: body.to_owned(),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .iter()
                .map(|request| request.url.clone())
                .collect()
        }
    }

    impl HttpClient for CannedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = HttpResponse::ok_json(self.body.clone());
            Box::pin(async move { Ok(response) })
        }
    }

    fn symbol(value: &str) -> Symbol {
        Symbol::parse(value).expect("valid symbol")
    }

    #[tokio::test]
    async fn quote_url_carries_function_symbol_and_key() {
        let http = CannedHttpClient::new(r#"{"Global Quote":{"01. symbol":"IBM"}}"#);
        let client = AlphaVantageClient::new(http.clone(), "https://av.test/query", "k&y");

        let quote = client.global_quote(&symbol("IBM")).await.expect("quote");
        assert_eq!(quote.symbol.as_deref(), Some("IBM"));
        assert_eq!(
            http.urls(),
            vec![String::from(
                "https://av.test/query?function=GLOBAL_QUOTE&symbol=IBM&apikey=k%26y"
            )]
        );
    }

    #[tokio::test]
    async fn empty_global_quote_means_no_data() {
        let http = CannedHttpClient::new(r#"{"Global Quote":{}}"#);
        let client = AlphaVantageClient::new(http, ALPHA_VANTAGE_BASE_URL, "key");

        let err = client.global_quote(&symbol("NOPE")).await.expect_err("must fail");
        assert_eq!(err, ProviderError::no_data("NOPE"));
    }

    #[tokio::test]
    async fn time_series_endpoint_follows_timeframe() {
        let http = CannedHttpClient::new("{}");
        let client = AlphaVantageClient::new(http.clone(), "https://av.test/query", "key");

        for timeframe in [Timeframe::OneDay, Timeframe::OneMonth, Timeframe::OneYear] {
            client
                .time_series(&symbol("MSFT"), timeframe)
                .await
                .expect("empty object still decodes");
        }

        let urls = http.urls();
        assert!(urls[0].contains("function=TIME_SERIES_INTRADAY&symbol=MSFT&interval=5min"));
        assert!(urls[1].contains("function=TIME_SERIES_DAILY&symbol=MSFT&outputsize=compact"));
        assert!(urls[2].contains("function=TIME_SERIES_DAILY&symbol=MSFT&outputsize=full"));
    }

    #[tokio::test]
    async fn news_without_feed_array_is_no_data() {
        let http = CannedHttpClient::new(r#"{"feed":"nope"}"#);
        let client = AlphaVantageClient::new(http.clone(), "https://av.test/query", "key");

        let err = client
            .news_sentiment(Some(&symbol("AAPL")))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ProviderError::NoDataForSymbol { .. }));
        assert!(http.urls()[0].contains("function=NEWS_SENTIMENT&tickers=AAPL"));
    }
}
