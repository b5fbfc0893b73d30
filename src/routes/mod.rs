//! HTTP route handlers

pub mod dashboard;
pub mod inquiries;
pub mod pricing;
pub mod views;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::cache::CacheStats;
use crate::AppState;

/// Page and inquiry routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/inquiries", get(inquiries::list).post(inquiries::create))
        .route("/inquiries/new", get(inquiries::new_form))
        .route("/pricing", get(pricing::calculator))
        .route("/pricing/calculate", axum::routing::post(pricing::calculate))
        .route("/pricing/save", axum::routing::post(pricing::save))
        .route("/inquiries/:id", get(inquiries::detail).post(inquiries::update))
        .route(
            "/api/inquiries/:id",
            axum::routing::put(inquiries::update_json).delete(inquiries::delete),
        )
        .route("/api/inquiries/:id/status", axum::routing::put(inquiries::update_status))
        .route("/api/cache/stats", get(cache_stats))
        .route("/health", get(health))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}
