use axum::routing::get;
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::cache::CacheClient;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    observability::init_metrics()?;

    info!(database = config.mongodb.database(), "Connecting to MongoDB");
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    let cache = CacheClient::connect(&config.cache, config.redis.as_ref()).await?;

    api::init_indexes(&db).await?;

    let state = AppState {
        config,
        mongo_client,
        db,
        cache,
    };

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state))?;

    // health, readiness and metrics stay outside /api
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()))
        .route("/metrics", get(observability::metrics_handler))
        .layer(axum::middleware::from_fn(observability::metrics_middleware));

    info!("Starting Attendance API with graceful shutdown (30s timeout)");

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing cache and MongoDB connections");
        state.cache.close().await;
        drop(state.mongo_client);
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Attendance API shutdown complete");
    Ok(())
}
