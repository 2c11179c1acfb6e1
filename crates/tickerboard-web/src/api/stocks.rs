use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use tickerboard_core::{DataOrigin, Symbol, Timeframe};

use super::{first_param, json_with_origin, AppState, QueryPairs};
use crate::error::{ApiError, ApiResult};

/// One quote when `symbol` is given, otherwise the popular-stocks list.
pub async fn get_stocks(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
) -> Response {
    match Symbol::from_query(first_param(&pairs, "symbol")) {
        Some(symbol) => {
            let quote = state.service.quote(&symbol).await;
            json_with_origin(quote.origin, quote.data)
        }
        None => {
            let list = state.service.popular_stocks().await;
            json_with_origin(DataOrigin::Sample, list)
        }
    }
}

pub async fn get_historical(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult<Response> {
    let symbol = Symbol::from_query(first_param(&pairs, "symbol"))
        .ok_or_else(|| ApiError::BadRequest(String::from("Symbol parameter is required")))?;
    let timeframe = Timeframe::parse_or_default(first_param(&pairs, "timeframe"));

    let series = state.service.historical(&symbol, timeframe).await;
    Ok(json_with_origin(series.origin, series.data))
}
