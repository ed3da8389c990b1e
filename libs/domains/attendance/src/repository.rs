use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::AttendanceResult;
use crate::models::{AppendOutcome, Attendance, AttendanceRoster};

/// Durable storage for attendance rosters.
///
/// `append_attendee` must be atomic on its own: the entry is added only if the
/// participant is absent and the roster holds fewer than `capacity` entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Insert a new roster; `RosterExists` when the event already has one
    async fn create(&self, roster: AttendanceRoster) -> AttendanceResult<AttendanceRoster>;

    async fn get_by_id(&self, id: Uuid) -> AttendanceResult<Option<AttendanceRoster>>;

    async fn find_by_event(&self, event_id: Uuid) -> AttendanceResult<Option<AttendanceRoster>>;

    /// All rosters, oldest first
    async fn list(&self) -> AttendanceResult<Vec<AttendanceRoster>>;

    async fn append_attendee(
        &self,
        event_id: Uuid,
        attendance: Attendance,
        capacity: u32,
    ) -> AttendanceResult<AppendOutcome>;

    /// Move a roster to another event; `RosterExists` when the target has one
    async fn reassign(
        &self,
        id: Uuid,
        event_id: Uuid,
    ) -> AttendanceResult<Option<AttendanceRoster>>;

    async fn delete(&self, id: Uuid) -> AttendanceResult<bool>;

    /// Attendee count per event id
    async fn attendee_counts(&self) -> AttendanceResult<HashMap<Uuid, usize>>;
}
