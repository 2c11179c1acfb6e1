mod alphavantage;
pub mod normalize;
mod validator;

pub use alphavantage::{
    AlphaVantageClient, CompanyOverview, FeedItem, GlobalQuote, SeriesEntry, TimeSeries,
    ALPHA_VANTAGE_BASE_URL,
};
pub use validator::{validate_response, Advisory, ValidatedPayload};
