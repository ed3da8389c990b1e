use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use domain_events::Event;
use domain_participants::Participant;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AttendanceError, AttendanceResult};

/// One roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Attendance {
    pub participant_id: Uuid,
    pub attended_at: DateTime<Utc>,
}

/// The attendee list of a single event.
///
/// Created on the first registration, never empty, append-only until removed.
/// At most one roster exists per `event_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRoster {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub event_id: Uuid,
    pub attendees: Vec<Attendance>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRoster {
    pub fn new(event_id: Uuid, first: Attendance) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            event_id,
            attendees: vec![first],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, participant_id: Uuid) -> bool {
        self.attendees
            .iter()
            .any(|a| a.participant_id == participant_id)
    }

    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }
}

/// Result of a conditional append to an existing roster
#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    Appended(AttendanceRoster),
    AlreadyRegistered,
    CapacityFull,
    /// No roster exists for the event
    Missing,
}

/// Request body for `POST /attendance`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterAttendance {
    pub event_id: Uuid,
    pub participant_id: Uuid,
    /// RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` (UTC) or `YYYY-MM-DD`; defaults to now
    #[validate(length(min = 1))]
    pub attended_at: Option<String>,
}

/// Response of a successful registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Registration {
    pub roster_id: Uuid,
    pub event_id: Uuid,
    pub participant_id: Uuid,
    pub attended_at: DateTime<Utc>,
    /// Roster size after this registration
    pub registered: usize,
    pub capacity: u32,
}

/// Request body for `PATCH /attendance/{id}`; only the event can change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRoster {
    pub event_id: Option<Uuid>,
}

/// Roster entry joined with its participant record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendeeDetails {
    pub participant_id: Uuid,
    pub attended_at: DateTime<Utc>,
    /// `null` when the participant was deleted after registering
    pub participant: Option<Participant>,
}

/// Roster joined with its event and participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RosterDetails {
    pub id: Uuid,
    pub event_id: Uuid,
    /// `null` when the event was deleted
    pub event: Option<Event>,
    pub attendees: Vec<AttendeeDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Occupancy of one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventStats {
    pub event_id: Uuid,
    pub name: String,
    pub capacity: u32,
    pub registered: usize,
    /// Percentage of capacity in use, two decimals
    pub percentage: f64,
}

/// Occupancy across all events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GlobalStats {
    pub total_events: usize,
    pub total_capacity: u64,
    pub total_registered: u64,
    pub average_occupancy_percentage: f64,
    pub details: Vec<EventStats>,
}

/// Parse an `attended_at` value.
///
/// Accepts RFC 3339, a naive date-time (taken as UTC) or a bare date
/// (midnight UTC).
pub fn parse_attended_at(raw: &str) -> AttendanceResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(AttendanceError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = parse_attended_at("2025-03-01T10:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime_is_utc() {
        let ts = parse_attended_at("2025-03-01T10:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap());

        let ts = parse_attended_at("2025-03-01T10:00:00.250").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let ts = parse_attended_at("2025-03-01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["yesterday", "2025-13-01", "01/03/2025", ""] {
            assert!(
                matches!(
                    parse_attended_at(raw),
                    Err(AttendanceError::InvalidTimestamp(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_roster_contains() {
        let participant_id = Uuid::now_v7();
        let roster = AttendanceRoster::new(
            Uuid::now_v7(),
            Attendance {
                participant_id,
                attended_at: Utc::now(),
            },
        );

        assert!(roster.contains(participant_id));
        assert!(!roster.contains(Uuid::now_v7()));
        assert_eq!(roster.len(), 1);
    }
}
