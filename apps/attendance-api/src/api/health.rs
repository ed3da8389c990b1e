//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// `GET /ready`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Pings MongoDB and the cache; 503 when either is unreachable.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "mongodb",
            Box::pin(async {
                database::mongodb::ping(&state.mongo_client)
                    .await
                    .map_err(|e| e.to_string())
            }),
        ),
        (
            "cache",
            Box::pin(async { state.cache.ping().await.map_err(|e| e.to_string()) }),
        ),
    ];

    run_health_checks(checks).await
}
