use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use tickerboard_core::DataOrigin;

use super::{json_with_origin, AppState};

/// Index list is always the authored set; the message reports provider status.
pub async fn get_market(State(state): State<Arc<AppState>>) -> Response {
    let overview = state.service.market_overview().await;
    json_with_origin(DataOrigin::Sample, overview)
}
