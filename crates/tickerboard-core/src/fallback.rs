//! # Fallback Supplier
//!
//! Read-only sample data served whenever the provider cannot answer.
//!
//! | Lookup | Known key | Unknown key |
//! |--------|-----------|-------------|
//! | [`FallbackCatalog::quote`] | authored quote, unmodified | generic `"<SYMBOL> Inc."` record at 100.00 |
//! | [`FallbackCatalog::index`] | authored index | `N/A` value and change |
//! | [`FallbackCatalog::news`] | symbol templates | general headlines |
//! | [`FallbackCatalog::generate`] | per-symbol walk profile | default profile |
//!
//! The built-in data is available through [`FallbackCatalog::sample`]; a
//! deployment may ship its own JSON file and load it with
//! [`FallbackCatalog::from_path`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::error::CoreError;
use crate::{HistoricalPoint, MarketIndex, NewsItem, Quote, Symbol, Timeframe};

const SYMBOL_PLACEHOLDER: &str = "{symbol}";
const GENERIC_PRICE: f64 = 100.0;
const GENERIC_PRICE_TEXT: &str = "100.00";
const NOT_AVAILABLE: &str = "N/A";

/// Headline template for symbol news; `{symbol}` is replaced on lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsTemplate {
    pub title: String,
    pub source: String,
    pub time: String,
}

/// Starting value and per-step drift of a sample random walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkProfile {
    pub baseline: f64,
    pub drift: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolWalk {
    pub symbol: String,
    #[serde(flatten)]
    pub profile: WalkProfile,
}

/// Canned dashboard data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackCatalog {
    pub quotes: Vec<Quote>,
    pub indices: Vec<MarketIndex>,
    pub news: Vec<NewsItem>,
    pub symbol_news: Vec<NewsTemplate>,
    pub walks: Vec<SymbolWalk>,
    pub default_walk: WalkProfile,
}

impl FallbackCatalog {
    /// Built-in sample data set.
    pub fn sample() -> Self {
        Self {
            quotes: vec![
                authored_quote(AuthoredQuote {
                    symbol: "AAPL",
                    name: "Apple Inc.",
                    price: 187.68,
                    change: 1.23,
                    change_percent: 0.66,
                    market_cap: "2.94T",
                    pe_ratio: "30.84",
                    dividend: "0.92%",
                    volume: "52.4M",
                    avg_volume: "58.7M",
                    day: ["188.45", "185.83", "186.12", "186.45"],
                    year: ["199.62", "124.17"],
                }),
                authored_quote(AuthoredQuote {
                    symbol: "MSFT",
                    name: "Microsoft Corporation",
                    price: 378.85,
                    change: 4.12,
                    change_percent: 1.1,
                    market_cap: "2.82T",
                    pe_ratio: "36.78",
                    dividend: "0.74%",
                    volume: "21.8M",
                    avg_volume: "25.3M",
                    day: ["380.12", "375.20", "376.45", "374.73"],
                    year: ["384.30", "275.37"],
                }),
                authored_quote(AuthoredQuote {
                    symbol: "GOOGL",
                    name: "Alphabet Inc.",
                    price: 134.99,
                    change: -0.87,
                    change_percent: -0.64,
                    market_cap: "1.69T",
                    pe_ratio: "25.96",
                    dividend: "0%",
                    volume: "18.3M",
                    avg_volume: "22.1M",
                    day: ["136.20", "134.45", "135.78", "135.86"],
                    year: ["142.68", "89.42"],
                }),
            ],
            indices: vec![
                authored_index("S&P 500", "SPY", "4,587.64", "+0.57%", true),
                authored_index("Dow Jones", "DIA", "37,306.02", "+0.86%", true),
                authored_index("Nasdaq", "QQQ", "14,403.97", "-0.23%", false),
                authored_index("Russell 2000", "IWM", "1,920.87", "+0.41%", true),
            ],
            news: [
                (
                    "Fed Signals Potential Rate Cuts in Coming Months",
                    "Financial Times",
                    "2 hours ago",
                ),
                (
                    "Tech Stocks Rally as Inflation Concerns Ease",
                    "Wall Street Journal",
                    "4 hours ago",
                ),
                (
                    "Apple Announces New Product Line, Shares Jump 3%",
                    "CNBC",
                    "6 hours ago",
                ),
                (
                    "Oil Prices Fall Amid Global Supply Concerns",
                    "Bloomberg",
                    "8 hours ago",
                ),
            ]
            .into_iter()
            .zip(1_u32..)
            .map(|((title, source, time), id)| NewsItem {
                id,
                title: title.to_owned(),
                source: source.to_owned(),
                time: time.to_owned(),
                url: String::from("#"),
                summary: None,
                image: None,
            })
            .collect(),
            symbol_news: [
                (
                    "{symbol} Reports Strong Quarterly Earnings, Beats Expectations",
                    "Financial Times",
                    "2 hours ago",
                ),
                (
                    "Analysts Raise Price Target for {symbol} Following Product Announcement",
                    "Wall Street Journal",
                    "4 hours ago",
                ),
                (
                    "{symbol} Expands into New Markets, Shares Rally",
                    "CNBC",
                    "6 hours ago",
                ),
                (
                    "Institutional Investors Increase Stakes in {symbol}",
                    "Bloomberg",
                    "8 hours ago",
                ),
            ]
            .into_iter()
            .map(|(title, source, time)| NewsTemplate {
                title: title.to_owned(),
                source: source.to_owned(),
                time: time.to_owned(),
            })
            .collect(),
            walks: [
                ("AAPL", 180.0, 0.0005),
                ("MSFT", 370.0, 0.0005),
                ("GOOGL", 130.0, 0.0001),
                ("AMZN", 150.0, 0.0001),
                ("TSLA", 240.0, -0.0002),
            ]
            .into_iter()
            .map(|(symbol, baseline, drift)| SymbolWalk {
                symbol: symbol.to_owned(),
                profile: WalkProfile { baseline, drift },
            })
            .collect(),
            default_walk: WalkProfile {
                baseline: 200.0,
                drift: 0.0001,
            },
        }
    }

    /// Load a catalog from a JSON file shaped like the serialized [`sample`](Self::sample).
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::SampleDataIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Exact-match authored quote, else the generic record for `symbol`.
    pub fn quote(&self, symbol: &Symbol) -> Quote {
        self.quotes
            .iter()
            .find(|quote| quote.symbol == symbol.as_str())
            .cloned()
            .unwrap_or_else(|| generic_quote(symbol.as_str()))
    }

    /// Symbol of the first authored quote, used to probe the provider.
    pub fn first_quote_symbol(&self) -> Option<Symbol> {
        self.quotes
            .first()
            .and_then(|quote| Symbol::parse(&quote.symbol).ok())
    }

    pub fn index(&self, symbol: &str, name: &str) -> MarketIndex {
        self.indices
            .iter()
            .find(|index| index.symbol == symbol)
            .cloned()
            .unwrap_or_else(|| MarketIndex {
                name: name.to_owned(),
                symbol: symbol.to_owned(),
                value: String::from(NOT_AVAILABLE),
                change: String::from(NOT_AVAILABLE),
                is_positive: true,
            })
    }

    /// Symbol templates when `symbol` is given, otherwise general headlines.
    pub fn news(&self, symbol: Option<&Symbol>) -> Vec<NewsItem> {
        let Some(symbol) = symbol else {
            return self.news.clone();
        };

        self.symbol_news
            .iter()
            .zip(1_u32..)
            .map(|(template, id)| NewsItem {
                id,
                title: template.title.replace(SYMBOL_PLACEHOLDER, symbol.as_str()),
                source: template.source.clone(),
                time: template.time.clone(),
                url: String::from("#"),
                summary: None,
                image: None,
            })
            .collect()
    }

    pub fn walk_profile(&self, symbol: &Symbol) -> WalkProfile {
        self.walks
            .iter()
            .find(|walk| walk.symbol == symbol.as_str())
            .map_or(self.default_walk, |walk| walk.profile)
    }

    /// Seeded random-walk series ending just before `now`.
    ///
    /// Hourly RFC 3339 points for `1D`; otherwise daily `YYYY-MM-DD` points
    /// with steps 5 and 6 of every week skipped. Equal seeds give equal series.
    pub fn generate(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        now: OffsetDateTime,
        seed: u64,
    ) -> Vec<HistoricalPoint> {
        let WalkProfile { baseline, drift } = self.walk_profile(symbol);
        let volatility = timeframe.sample_volatility();
        let steps = timeframe.sample_steps();
        let mut rng = fastrand::Rng::with_seed(seed);

        let mut value = baseline;
        let mut points = Vec::with_capacity(steps);
        for step in 0..steps {
            if !timeframe.is_intraday() && matches!(step % 7, 5 | 6) {
                continue;
            }

            let shock = (rng.f64() - 0.5) * 2.0;
            value += value * volatility * shock + value * drift;

            let back = (steps - step) as i64;
            let date = if timeframe.is_intraday() {
                let at = now - Duration::hours(back);
                at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
            } else {
                (now - Duration::days(back)).date().to_string()
            };
            points.push(HistoricalPoint::new(date, round_cents(value)));
        }

        points
    }
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        Self::sample()
    }
}

struct AuthoredQuote {
    symbol: &'static str,
    name: &'static str,
    price: f64,
    change: f64,
    change_percent: f64,
    market_cap: &'static str,
    pe_ratio: &'static str,
    dividend: &'static str,
    volume: &'static str,
    avg_volume: &'static str,
    /// high, low, open, previous close
    day: [&'static str; 4],
    /// 52-week high, 52-week low
    year: [&'static str; 2],
}

fn authored_quote(quote: AuthoredQuote) -> Quote {
    let [high, low, open, prev_close] = quote.day;
    let [year_high, year_low] = quote.year;
    Quote {
        symbol: quote.symbol.to_owned(),
        name: quote.name.to_owned(),
        price: quote.price,
        change: quote.change,
        change_percent: quote.change_percent,
        market_cap: quote.market_cap.to_owned(),
        pe_ratio: quote.pe_ratio.to_owned(),
        dividend: quote.dividend.to_owned(),
        volume: quote.volume.to_owned(),
        avg_volume: Some(quote.avg_volume.to_owned()),
        high: high.to_owned(),
        low: low.to_owned(),
        open: open.to_owned(),
        prev_close: prev_close.to_owned(),
        fifty_two_week_high: year_high.to_owned(),
        fifty_two_week_low: year_low.to_owned(),
        ..empty_details()
    }
}

fn generic_quote(symbol: &str) -> Quote {
    let not_available = || String::from(NOT_AVAILABLE);
    let generic_price = || String::from(GENERIC_PRICE_TEXT);
    Quote {
        symbol: symbol.to_owned(),
        name: format!("{symbol} Inc."),
        price: GENERIC_PRICE,
        change: 0.0,
        change_percent: 0.0,
        market_cap: not_available(),
        pe_ratio: not_available(),
        dividend: not_available(),
        volume: not_available(),
        avg_volume: Some(not_available()),
        high: generic_price(),
        low: generic_price(),
        open: generic_price(),
        prev_close: generic_price(),
        fifty_two_week_high: generic_price(),
        fifty_two_week_low: generic_price(),
        ..empty_details()
    }
}

/// Quote with every optional overview field unset.
fn empty_details() -> Quote {
    Quote {
        symbol: String::new(),
        name: String::new(),
        price: 0.0,
        change: 0.0,
        change_percent: 0.0,
        market_cap: String::new(),
        pe_ratio: String::new(),
        dividend: String::new(),
        volume: String::new(),
        avg_volume: None,
        high: String::new(),
        low: String::new(),
        open: String::new(),
        prev_close: String::new(),
        fifty_two_week_high: String::new(),
        fifty_two_week_low: String::new(),
        description: None,
        sector: None,
        industry: None,
        exchange: None,
        currency: None,
        country: None,
        eps: None,
        profit_margin: None,
        beta: None,
        moving_avg50: None,
        moving_avg200: None,
    }
}

fn authored_index(
    name: &str,
    symbol: &str,
    value: &str,
    change: &str,
    is_positive: bool,
) -> MarketIndex {
    MarketIndex {
        name: name.to_owned(),
        symbol: symbol.to_owned(),
        value: value.to_owned(),
        change: change.to_owned(),
        is_positive,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use time::macros::datetime;

    use super::*;

    fn symbol(value: &str) -> Symbol {
        Symbol::parse(value).expect("valid symbol")
    }

    #[test]
    fn authored_quote_is_returned_unmodified() {
        let catalog = FallbackCatalog::sample();
        let quote = catalog.quote(&symbol("GOOGL"));
        assert_eq!(quote.name, "Alphabet Inc.");
        assert_eq!(quote.price, 134.99);
        assert_eq!(quote.change, -0.87);
        assert_eq!(quote.dividend, "0%");
        assert_eq!(quote.fifty_two_week_low, "89.42");
    }

    #[test]
    fn unknown_quote_gets_generic_record() {
        let quote = FallbackCatalog::sample().quote(&symbol("ZZZZ"));
        assert_eq!(quote.symbol, "ZZZZ");
        assert_eq!(quote.name, "ZZZZ Inc.");
        assert_eq!(quote.price, 100.0);
        assert_eq!(quote.change_percent, 0.0);
        assert_eq!(quote.market_cap, "N/A");
        assert_eq!(quote.avg_volume.as_deref(), Some("N/A"));
        assert_eq!(quote.high, "100.00");
        assert_eq!(quote.fifty_two_week_high, "100.00");
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let quote = FallbackCatalog::sample().quote(&symbol("aapl"));
        assert_eq!(quote.name, "aapl Inc.");
    }

    #[test]
    fn unknown_index_is_not_available() {
        let catalog = FallbackCatalog::sample();
        assert_eq!(catalog.index("QQQ", "ignored").name, "Nasdaq");

        let index = catalog.index("VTI", "Total Market");
        assert_eq!(index.name, "Total Market");
        assert_eq!(index.value, "N/A");
        assert_eq!(index.change, "N/A");
        assert!(index.is_positive);
    }

    #[test]
    fn symbol_news_interpolates_templates() {
        let catalog = FallbackCatalog::sample();
        let items = catalog.news(Some(&symbol("NVDA")));
        assert_eq!(items.len(), 4);
        assert_eq!(
            items[1].title,
            "Analysts Raise Price Target for NVDA Following Product Announcement"
        );
        assert_eq!(items[3].id, 4);
        assert!(items.iter().all(|item| item.url == "#"));

        let general = catalog.news(None);
        assert_eq!(general[0].title, "Fed Signals Potential Rate Cuts in Coming Months");
    }

    #[test]
    fn walk_is_reproducible_for_a_seed() {
        let catalog = FallbackCatalog::sample();
        let now = datetime!(2024-06-01 12:00 UTC);
        let first = catalog.generate(&symbol("AAPL"), Timeframe::OneYear, now, 42);
        let second = catalog.generate(&symbol("AAPL"), Timeframe::OneYear, now, 42);
        let other = catalog.generate(&symbol("AAPL"), Timeframe::OneYear, now, 43);

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn daily_walk_skips_two_of_every_seven_steps() {
        let catalog = FallbackCatalog::sample();
        let now = datetime!(2024-06-01 12:00 UTC);

        let month = catalog.generate(&symbol("MSFT"), Timeframe::OneMonth, now, 7);
        assert_eq!(month.len(), 22);
        assert_eq!(month[0].date, "2024-05-02");
        assert_eq!(month[5].date, "2024-05-09");
        assert!(month.windows(2).all(|pair| pair[0].date < pair[1].date));

        let week = catalog.generate(&symbol("MSFT"), Timeframe::OneWeek, now, 7);
        assert_eq!(week.len(), 5);
    }

    #[test]
    fn intraday_walk_is_hourly_rfc3339() {
        let catalog = FallbackCatalog::sample();
        let now = datetime!(2024-06-01 12:00 UTC);
        let points = catalog.generate(&symbol("TSLA"), Timeframe::OneDay, now, 1);

        assert_eq!(points.len(), 24);
        assert_eq!(points[0].date, "2024-05-31T12:00:00Z");
        assert_eq!(points[23].date, "2024-06-01T11:00:00Z");
    }

    #[test]
    fn walk_values_are_rounded_and_near_baseline() {
        let catalog = FallbackCatalog::sample();
        let now = datetime!(2024-06-01 12:00 UTC);
        let points = catalog.generate(&symbol("ZZZZ"), Timeframe::OneDay, now, 99);

        for point in &points {
            assert_eq!(point.value, round_cents(point.value));
        }
        // 24 steps of at most 0.5% plus drift cannot leave this band.
        assert!(points.iter().all(|p| p.value > 170.0 && p.value < 230.0));
    }

    #[test]
    fn catalog_loads_from_json_file() {
        let mut custom = FallbackCatalog::sample();
        custom.quotes.truncate(1);
        custom.default_walk.baseline = 50.0;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(serde_json::to_string(&custom).expect("serialize").as_bytes())
            .expect("write");

        let loaded = FallbackCatalog::from_path(file.path()).expect("load");
        assert_eq!(loaded, custom);
        assert_eq!(loaded.walk_profile(&symbol("ZZZZ")).baseline, 50.0);
    }

    #[test]
    fn missing_catalog_file_is_io_error() {
        let err = FallbackCatalog::from_path(Path::new("/nonexistent/tickerboard.json"))
            .expect_err("must fail");
        assert!(matches!(err, CoreError::SampleDataIo { .. }));
    }
}
