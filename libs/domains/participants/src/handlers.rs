//! HTTP handlers for the participants API

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::errors::responses::{
    BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse, NotFoundResponse,
    ServiceUnavailableResponse,
};
use axum_helpers::{UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ParticipantResult;
use crate::models::{CreateParticipant, Participant, UpdateParticipant};
use crate::repository::ParticipantRepository;
use crate::service::ParticipantService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_participants,
        create_participant,
        get_participant,
        update_participant,
        delete_participant
    ),
    components(
        schemas(Participant, CreateParticipant, UpdateParticipant),
        responses(
            BadRequestUuidResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            NotFoundResponse,
            ServiceUnavailableResponse
        )
    ),
    tags((name = "Participants", description = "Participant directory"))
)]
pub struct ApiDoc;

/// Router for `/participants`
pub fn router<R: ParticipantRepository + 'static>(service: ParticipantService<R>) -> Router {
    Router::new()
        .route("/", get(list_participants::<R>).post(create_participant::<R>))
        .route(
            "/{id}",
            get(get_participant::<R>)
                .patch(update_participant::<R>)
                .delete(delete_participant::<R>),
        )
        .with_state(Arc::new(service))
}

/// List all participants
#[utoipa::path(
    get,
    path = "",
    tag = "Participants",
    responses(
        (status = 200, description = "All participants ordered by name", body = Vec<Participant>),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_participants<R: ParticipantRepository>(
    State(service): State<Arc<ParticipantService<R>>>,
) -> ParticipantResult<Json<Vec<Participant>>> {
    Ok(Json(service.list_participants().await?))
}

/// Create a participant
#[utoipa::path(
    post,
    path = "",
    tag = "Participants",
    request_body = CreateParticipant,
    responses(
        (status = 201, description = "Participant created", body = Participant),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_participant<R: ParticipantRepository>(
    State(service): State<Arc<ParticipantService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateParticipant>,
) -> ParticipantResult<impl IntoResponse> {
    let participant = service.create_participant(input).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

/// Get a participant by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Participants",
    params(("id" = Uuid, Path, description = "Participant ID")),
    responses(
        (status = 200, description = "Participant found", body = Participant),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_participant<R: ParticipantRepository>(
    State(service): State<Arc<ParticipantService<R>>>,
    UuidPath(id): UuidPath,
) -> ParticipantResult<Json<Participant>> {
    Ok(Json(service.get_participant(id).await?))
}

/// Update a participant
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Participants",
    params(("id" = Uuid, Path, description = "Participant ID")),
    request_body = UpdateParticipant,
    responses(
        (status = 200, description = "Participant updated", body = Participant),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_participant<R: ParticipantRepository>(
    State(service): State<Arc<ParticipantService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateParticipant>,
) -> ParticipantResult<Json<Participant>> {
    Ok(Json(service.update_participant(id, input).await?))
}

/// Delete a participant
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Participants",
    params(("id" = Uuid, Path, description = "Participant ID")),
    responses(
        (status = 204, description = "Participant deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn delete_participant<R: ParticipantRepository>(
    State(service): State<Arc<ParticipantService<R>>>,
    UuidPath(id): UuidPath,
) -> ParticipantResult<impl IntoResponse> {
    service.delete_participant(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
