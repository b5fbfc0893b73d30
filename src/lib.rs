//! Back office for a wheelchair ramp rental business.
//!
//! Customer inquiries, a pricing engine, quote persistence and a dashboard of
//! active rentals, served with axum over PostgreSQL.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod validation;

use axum::Router;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::cache::AppCache;
use crate::config::AppConfig;
use crate::pricing::{DistanceResolver, PricingEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub pricing: PricingEngine,
    pub distance: DistanceResolver,
}

impl AppState {
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        let distance = DistanceResolver::new(
            config.google_maps_api_key.clone(),
            config.business_address.clone(),
        )
        .with_base_url(config.distance_api_base_url.clone())
        .with_timeout(config.distance_timeout);

        Self {
            db,
            cache: AppCache::new(),
            pricing: PricingEngine::default(),
            distance,
        }
    }
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .merge(pricing::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
