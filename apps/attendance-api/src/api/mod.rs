//! API routes, nested under `/api` by `axum_helpers::create_router`.

pub mod health;

use std::sync::Arc;

use axum::Router;
use domain_attendance::{AttendanceService, MongoRosterRepository};
use domain_events::{EventService, MongoEventRepository};
use domain_participants::{MongoParticipantRepository, ParticipantService};
use mongodb::Database;
use tracing::info;

use crate::state::AppState;

/// Ensure every collection's indexes exist.
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoEventRepository::new(db).init_indexes().await?;
    MongoParticipantRepository::new(db).init_indexes().await?;
    MongoRosterRepository::new(db).init_indexes().await?;
    info!("MongoDB indexes initialized");
    Ok(())
}

pub fn routes(state: &AppState) -> Router {
    let events = MongoEventRepository::new(&state.db);
    let participants = MongoParticipantRepository::new(&state.db);

    let attendance = AttendanceService::new(
        MongoRosterRepository::new(&state.db),
        Arc::new(events.clone()),
        Arc::new(participants.clone()),
        state.cache.clone(),
    );

    let events_router = domain_events::router(EventService::new(events, state.cache.clone()))
        .merge(domain_attendance::stats_router(attendance.clone()));
    let participants_router =
        domain_participants::router(ParticipantService::new(participants, state.cache.clone()));

    Router::new()
        .nest("/events", events_router)
        .nest("/participants", participants_router)
        .nest("/attendance", domain_attendance::router(attendance))
}
