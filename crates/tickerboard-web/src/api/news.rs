use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use tickerboard_core::Symbol;

use super::{first_param, json_with_origin, AppState, QueryPairs};

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
) -> Response {
    let symbol = Symbol::from_query(first_param(&pairs, "symbol"));
    let news = state.service.news(symbol.as_ref()).await;
    json_with_origin(news.origin, news.data)
}
