//! Event domain models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A scheduled event with a fixed number of seats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,

    pub name: String,

    /// Calendar day the event takes place
    pub date: NaiveDate,

    /// Maximum number of attendees
    pub capacity: u32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(name: impl Into<String>, date: NaiveDate, capacity: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            date,
            capacity,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Day/month/year triple accepted on input.
///
/// Field ranges are checked by `validate()`; whether the triple names a real
/// day (no 31st of February) is checked by [`EventDate::to_naive_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct EventDate {
    #[validate(range(min = 1, max = 31))]
    pub day: u32,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(range(min = 2000))]
    pub year: i32,
}

impl EventDate {
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// DTO for creating an event
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(nested)]
    pub date: EventDate,

    /// Signed so a negative value is reported as a validation error
    #[validate(range(min = 0, max = 4294967295_i64))]
    pub capacity: i64,
}

/// DTO for updating an event; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(nested)]
    pub date: Option<EventDate>,

    #[validate(range(min = 0, max = 4294967295_i64))]
    pub capacity: Option<i64>,
}
