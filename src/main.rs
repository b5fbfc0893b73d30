use anyhow::Context;
use ramp_rental_web::{app, cache, config::AppConfig, AppState};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("connecting to database")?;

    sqlx::migrate!()
        .run(&db)
        .await
        .context("running migrations")?;

    let state = AppState::new(db.clone(), &config);
    if !state.distance.has_api_key() {
        info!("GOOGLE_MAPS_API_KEY not set; quotes will use the default distance");
    }

    tokio::spawn(cache::start_cache_warmer(state.cache.clone(), db));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, origin = state.distance.origin(), "ramp rental back office listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
