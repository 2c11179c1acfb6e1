//! # Domain Models
//!
//! Display-ready records served to the dashboard, plus the two request-side
//! value types ([`Symbol`], [`Timeframe`]).
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Quote`] | Price, change, day range, and company overview fields |
//! | [`HistoricalPoint`] | `(date, value)` pair of a price series |
//! | [`MarketIndex`] | Index name, ETF proxy, formatted value and change |
//! | [`NewsItem`] | Headline with relative publication time |
//! | [`StockList`] / [`IndexList`] | Aggregate endpoint bodies |
//! | [`Fetched`] | Any of the above tagged with its [`DataOrigin`] |
//!
//! Records are plain values built fresh for every request.

mod models;
mod symbol;
mod timeframe;

pub use models::{
    DataOrigin, Fetched, HistoricalPoint, IndexList, MarketIndex, NewsItem, Quote, StockList,
};
pub use symbol::Symbol;
pub use timeframe::{SeriesKind, Timeframe};
