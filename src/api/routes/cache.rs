//! Cache maintenance routes.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::server::AppState;
use crate::cache::CacheStats;

/// GET /api/cache/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// DELETE /api/cache: drops every record.
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<Value> {
    let cleared = state.cache.invalidate(None);
    tracing::info!(cleared, "Cache cleared via API");
    Json(json!({ "cleared": cleared }))
}
