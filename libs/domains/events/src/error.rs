//! Event domain error types

use axum_helpers::AppError;
use std::fmt;
use uuid::Uuid;

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Event domain errors
#[derive(Debug)]
pub enum EventError {
    /// Event not found
    NotFound { id: Uuid },

    /// Input failed field validation
    Validation { message: String },

    /// Day/month/year do not name a real calendar day
    InvalidDate { day: u32, month: u32, year: i32 },

    /// MongoDB error
    Database {
        message: String,
        source: Option<mongodb::error::Error>,
    },

    /// Internal error
    Internal { message: String },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "Event not found: {}", id),
            Self::Validation { message } => write!(f, "Validation error: {}", message),
            Self::InvalidDate { day, month, year } => {
                write!(f, "Invalid event date: {:02}/{:02}/{}", day, month, year)
            }
            Self::Database { message, .. } => write!(f, "Database error: {}", message),
            Self::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for EventError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database {
                source: Some(e), ..
            } => Some(e),
            _ => None,
        }
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Internal {
            message: format!("BSON serialization error: {}", err),
        }
    }
}

impl From<validator::ValidationErrors> for EventError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation {
            message: err.to_string(),
        }
    }
}

// Convert to axum_helpers::AppError for HTTP responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound { id } => AppError::NotFound(format!("Event not found: {}", id)),
            EventError::Validation { message } => AppError::BadRequest(message),
            err @ EventError::InvalidDate { .. } => AppError::BadRequest(err.to_string()),
            EventError::Database { message, .. } => AppError::ServiceUnavailable(message),
            EventError::Internal { message } => AppError::InternalServerError(message),
        }
    }
}

impl axum::response::IntoResponse for EventError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
