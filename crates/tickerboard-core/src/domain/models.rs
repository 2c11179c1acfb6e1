use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Display-ready stock quote.
///
/// Numeric fields used for arithmetic by the dashboard (`price`, `change`,
/// `change_percent`) stay numeric; everything else is pre-formatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub market_cap: String,
    pub pe_ratio: String,
    pub dividend: String,
    pub volume: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_volume: Option<String>,
    pub high: String,
    pub low: String,
    pub open: String,
    pub prev_close: String,
    pub fifty_two_week_high: String,
    pub fifty_two_week_low: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_avg50: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_avg200: Option<String>,
}

/// One point of a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: String,
    pub value: f64,
}

impl HistoricalPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// Market index summary, tracked through an ETF proxy symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    pub name: String,
    pub symbol: String,
    pub value: String,
    pub change: String,
    pub is_positive: bool,
}

/// News headline. `id` is the 1-based position in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: u32,
    pub title: String,
    pub source: String,
    pub time: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body of the stock list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockList {
    pub stocks: Vec<Quote>,
    pub message: String,
}

/// Body of the market overview endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexList {
    pub indices: Vec<MarketIndex>,
    pub message: String,
}

/// Where a response body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Live,
    Sample,
}

impl DataOrigin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Sample => "sample",
        }
    }
}

impl Display for DataOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response body tagged with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    pub origin: DataOrigin,
}

impl<T> Fetched<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            origin: DataOrigin::Live,
        }
    }

    pub fn sample(data: T) -> Self {
        Self {
            data,
            origin: DataOrigin::Sample,
        }
    }

    pub fn is_live(&self) -> bool {
        self.origin == DataOrigin::Live
    }
}
