//! # Dashboard API
//!
//! | Route | Query | Body |
//! |-------|-------|------|
//! | `GET /api/stocks` | `symbol?` | quote, or `{stocks, message}` |
//! | `GET /api/stocks/historical` | `symbol`, `timeframe?` | `[{date, value}]` |
//! | `GET /api/news` | `symbol?` | `[NewsItem]` |
//! | `GET /api/market` | | `{indices, message}` |
//!
//! Successful responses carry an `x-data-origin` header (`live` or `sample`).
//! A repeated query key resolves to its first value.

mod market;
mod news;
mod stocks;

use std::any::Any;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tickerboard_core::{DataOrigin, MarketDataService};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

pub const DATA_ORIGIN_HEADER: HeaderName = HeaderName::from_static("x-data-origin");

/// Shared handler state.
pub struct AppState {
    pub service: MarketDataService,
}

impl AppState {
    pub fn new(service: MarketDataService) -> Arc<Self> {
        Arc::new(Self { service })
    }
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/stocks", get(stocks::get_stocks))
        .route("/api/stocks/historical", get(stocks::get_historical))
        .route("/api/news", get(news::get_news))
        .route("/api/market", get(market::get_market))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Raw query string pairs in request order.
type QueryPairs = Vec<(String, String)>;

fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// JSON body tagged with the `x-data-origin` header.
fn json_with_origin<T: Serialize>(origin: DataOrigin, body: T) -> Response {
    (
        [(DATA_ORIGIN_HEADER, HeaderValue::from_static(origin.as_str()))],
        Json(body),
    )
        .into_response()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "request handler panicked");

    ApiError::Internal(String::from("Internal server error")).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    async fn explode() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn panicking_handler_becomes_internal_server_error() {
        let router = Router::new()
            .route("/explode", get(explode))
            .layer(CatchPanicLayer::custom(panic_response));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/explode")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        assert_eq!(&bytes[..], br#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn owned_panic_payload_is_also_answered_with_500() {
        let response = panic_response(Box::new(String::from("owned message")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn first_param_takes_the_earliest_value_of_a_repeated_key() {
        let pairs = vec![
            (String::from("symbol"), String::from("AAPL")),
            (String::from("timeframe"), String::from("1Y")),
            (String::from("symbol"), String::from("MSFT")),
        ];

        assert_eq!(first_param(&pairs, "symbol"), Some("AAPL"));
        assert_eq!(first_param(&pairs, "timeframe"), Some("1Y"));
        assert_eq!(first_param(&pairs, "news"), None);
    }
}
