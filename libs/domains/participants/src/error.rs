use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ParticipantError {
    #[error("Participant not found: {0}")]
    NotFound(Uuid),

    #[error("Participant with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ParticipantResult<T> = Result<T, ParticipantError>;

impl From<ParticipantError> for AppError {
    fn from(err: ParticipantError) -> Self {
        match err {
            ParticipantError::NotFound(id) => {
                AppError::NotFound(format!("Participant {} not found", id))
            }
            ParticipantError::DuplicateEmail(email) => AppError::Conflict(format!(
                "Participant with email '{}' already exists",
                email
            )),
            ParticipantError::Validation(msg) => AppError::BadRequest(msg),
            ParticipantError::Database(msg) => AppError::ServiceUnavailable(msg),
            ParticipantError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ParticipantError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ParticipantError {
    fn from(err: mongodb::error::Error) -> Self {
        ParticipantError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ParticipantError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ParticipantError::Internal(format!("BSON serialization error: {}", err))
    }
}
