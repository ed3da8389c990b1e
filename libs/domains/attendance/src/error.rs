use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_events::EventError;
use domain_participants::ParticipantError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    #[error("Participant not found: {0}")]
    ParticipantNotFound(Uuid),

    #[error("Attendance roster not found: {0}")]
    RosterNotFound(Uuid),

    #[error("Participant {participant_id} already registered for event {event_id}")]
    AlreadyRegistered { event_id: Uuid, participant_id: Uuid },

    #[error("Event {event_id} is at capacity ({capacity})")]
    CapacityFull { event_id: Uuid, capacity: u32 },

    #[error("Event {0} already has an attendance roster")]
    RosterExists(Uuid),

    #[error("Invalid attendance timestamp: '{0}'")]
    InvalidTimestamp(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AttendanceResult<T> = Result<T, AttendanceError>;

impl AttendanceError {
    /// Business rule violations, as opposed to infrastructure failures
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyRegistered { .. } | Self::CapacityFull { .. } | Self::RosterExists(_)
        )
    }
}

impl From<AttendanceError> for AppError {
    fn from(err: AttendanceError) -> Self {
        match err {
            AttendanceError::EventNotFound(id) => {
                AppError::NotFound(format!("Event {} not found", id))
            }
            AttendanceError::ParticipantNotFound(id) => {
                AppError::NotFound(format!("Participant {} not found", id))
            }
            AttendanceError::RosterNotFound(id) => {
                AppError::NotFound(format!("Attendance roster {} not found", id))
            }
            AttendanceError::AlreadyRegistered { .. } => {
                AppError::Conflict("Participant already registered for this event".to_string())
            }
            AttendanceError::CapacityFull { .. } => {
                AppError::Conflict("Event capacity is full".to_string())
            }
            AttendanceError::RosterExists(event_id) => AppError::Conflict(format!(
                "Event {} already has an attendance roster",
                event_id
            )),
            AttendanceError::InvalidTimestamp(raw) => AppError::BadRequest(format!(
                "attended_at '{}' is not an ISO 8601 timestamp",
                raw
            )),
            AttendanceError::Database(msg) => AppError::ServiceUnavailable(msg),
            AttendanceError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for AttendanceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<EventError> for AttendanceError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound { id } => AttendanceError::EventNotFound(id),
            EventError::Database { message, .. } => AttendanceError::Database(message),
            other => AttendanceError::Internal(other.to_string()),
        }
    }
}

impl From<ParticipantError> for AttendanceError {
    fn from(err: ParticipantError) -> Self {
        match err {
            ParticipantError::NotFound(id) => AttendanceError::ParticipantNotFound(id),
            ParticipantError::Database(msg) => AttendanceError::Database(msg),
            other => AttendanceError::Internal(other.to_string()),
        }
    }
}

impl From<mongodb::error::Error> for AttendanceError {
    fn from(err: mongodb::error::Error) -> Self {
        AttendanceError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AttendanceError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AttendanceError::Internal(format!("BSON serialization error: {}", err))
    }
}

impl From<mongodb::bson::de::Error> for AttendanceError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AttendanceError::Internal(format!("BSON deserialization error: {}", err))
    }
}
