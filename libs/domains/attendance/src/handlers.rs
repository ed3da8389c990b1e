//! HTTP handlers for attendance registration and statistics

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::errors::responses::{
    BadRequestResponse, BadRequestUuidResponse, ConflictResponse, NotFoundResponse,
    ServiceUnavailableResponse,
};
use axum_helpers::{UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AttendanceResult;
use crate::models::{
    Attendance, AttendeeDetails, EventStats, GlobalStats, RegisterAttendance, Registration,
    RosterDetails, UpdateRoster,
};
use crate::repository::RosterRepository;
use crate::service::AttendanceService;

#[derive(OpenApi)]
#[openapi(
    paths(list_rosters, register, get_roster, update_roster, remove_roster),
    components(
        schemas(
            Attendance,
            AttendeeDetails,
            RegisterAttendance,
            Registration,
            RosterDetails,
            UpdateRoster
        ),
        responses(
            BadRequestResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            NotFoundResponse,
            ServiceUnavailableResponse
        )
    ),
    tags((name = "Attendance", description = "Per-event attendance rosters"))
)]
pub struct ApiDoc;

/// Statistics routes, served under `/events`
#[derive(OpenApi)]
#[openapi(
    paths(stats_all_events, stats_for_event),
    components(schemas(EventStats, GlobalStats)),
    tags((name = "Statistics", description = "Event occupancy"))
)]
pub struct StatsApiDoc;

/// Router for `/attendance`
pub fn router<R: RosterRepository + 'static>(service: AttendanceService<R>) -> Router {
    Router::new()
        .route("/", get(list_rosters::<R>).post(register::<R>))
        .route(
            "/{id}",
            get(get_roster::<R>)
                .patch(update_roster::<R>)
                .delete(remove_roster::<R>),
        )
        .with_state(Arc::new(service))
}

/// `/stats` and `/{id}/stats`, merged into the events router
pub fn stats_router<R: RosterRepository + 'static>(service: AttendanceService<R>) -> Router {
    Router::new()
        .route("/stats", get(stats_all_events::<R>))
        .route("/{id}/stats", get(stats_for_event::<R>))
        .with_state(Arc::new(service))
}

/// List all rosters with their events and participants
#[utoipa::path(
    get,
    path = "",
    tag = "Attendance",
    responses(
        (status = 200, description = "All rosters", body = Vec<RosterDetails>),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_rosters<R: RosterRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
) -> AttendanceResult<Json<Vec<RosterDetails>>> {
    Ok(Json(service.list_rosters().await?))
}

/// Register a participant for an event
#[utoipa::path(
    post,
    path = "",
    tag = "Attendance",
    request_body = RegisterAttendance,
    responses(
        (status = 201, description = "Participant registered", body = Registration),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn register<R: RosterRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterAttendance>,
) -> AttendanceResult<impl IntoResponse> {
    let registration = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// Get a roster by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Attendance",
    params(("id" = Uuid, Path, description = "Roster ID")),
    responses(
        (status = 200, description = "Roster found", body = RosterDetails),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_roster<R: RosterRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
    UuidPath(id): UuidPath,
) -> AttendanceResult<Json<RosterDetails>> {
    Ok(Json(service.get_roster(id).await?))
}

/// Reassign a roster to another event
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Attendance",
    params(("id" = Uuid, Path, description = "Roster ID")),
    request_body = UpdateRoster,
    responses(
        (status = 200, description = "Roster updated", body = RosterDetails),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_roster<R: RosterRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateRoster>,
) -> AttendanceResult<Json<RosterDetails>> {
    Ok(Json(service.update_roster(id, input).await?))
}

/// Remove a roster
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Attendance",
    params(("id" = Uuid, Path, description = "Roster ID")),
    responses(
        (status = 204, description = "Roster removed"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn remove_roster<R: RosterRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
    UuidPath(id): UuidPath,
) -> AttendanceResult<impl IntoResponse> {
    service.remove_roster(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Occupancy of every event
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Statistics",
    responses(
        (status = 200, description = "Global occupancy", body = GlobalStats),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn stats_all_events<R: RosterRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
) -> AttendanceResult<Json<GlobalStats>> {
    Ok(Json(service.stats_all_events().await?))
}

/// Occupancy of one event
#[utoipa::path(
    get,
    path = "/{id}/stats",
    tag = "Statistics",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event occupancy", body = EventStats),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn stats_for_event<R: RosterRepository>(
    State(service): State<Arc<AttendanceService<R>>>,
    UuidPath(id): UuidPath,
) -> AttendanceResult<Json<EventStats>> {
    Ok(Json(service.stats_for_event(id).await?))
}
