//! # Tickerboard Core
//!
//! Quote fetch, normalization, and sample-data fallback pipeline behind the
//! tickerboard dashboard API.
//!
//! ## Overview
//!
//! A single provider (Alpha Vantage) supplies live quotes, price series,
//! index proxies, and news. Whenever the provider is unconfigured or a call
//! fails, the service answers from a [`FallbackCatalog`] instead, so callers
//! always receive a well-formed body.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Explicit service configuration |
//! | [`domain`] | Display-ready records and request value types |
//! | [`error`] | Validation, provider, and startup errors |
//! | [`fallback`] | Authored sample data and the seeded random walk |
//! | [`http_client`] | Transport seam and the reqwest implementation |
//! | [`provider`] | Response validation, typed payloads, field normalization |
//! | [`service`] | Per-endpoint fetch orchestration |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickerboard_core::{
//!     DashboardConfig, FallbackCatalog, MarketDataService, ReqwestHttpClient, Symbol,
//! };
//!
//! let config = DashboardConfig::new().with_api_key(std::env::var("ALPHA_VANTAGE_API_KEY").ok());
//! let service = MarketDataService::new(
//!     config,
//!     Arc::new(ReqwestHttpClient::new()),
//!     Arc::new(FallbackCatalog::sample()),
//! );
//!
//! let quote = service.quote(&Symbol::parse("AAPL")?).await;
//! println!("{} {} ({})", quote.data.symbol, quote.data.price, quote.origin);
//! ```
//!
//! ## Security
//!
//! - The API key is only placed in provider URLs; logged URLs are redacted
//! - `DashboardConfig`'s `Debug` output masks the key

pub mod config;
pub mod domain;
pub mod error;
pub mod fallback;
pub mod http_client;
pub mod provider;
pub mod service;

pub use config::DashboardConfig;

pub use domain::{
    DataOrigin, Fetched, HistoricalPoint, IndexList, MarketIndex, NewsItem, Quote, SeriesKind,
    StockList, Symbol, Timeframe,
};

pub use error::{CoreError, ProviderError, ValidationError};

pub use fallback::{FallbackCatalog, NewsTemplate, SymbolWalk, WalkProfile};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use service::{Clock, MarketDataService};
