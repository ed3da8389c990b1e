//! In-process RosterRepository for tests and local development

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{AppendOutcome, Attendance, AttendanceRoster};
use crate::repository::RosterRepository;

/// Conditional writes run under one write lock, matching the atomicity of
/// the Mongo implementation.
#[derive(Clone, Default)]
pub struct InMemoryRosterRepository {
    rosters: Arc<RwLock<HashMap<Uuid, AttendanceRoster>>>,
}

impl InMemoryRosterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn create(&self, roster: AttendanceRoster) -> AttendanceResult<AttendanceRoster> {
        let mut rosters = self.rosters.write().await;
        if rosters.values().any(|r| r.event_id == roster.event_id) {
            return Err(AttendanceError::RosterExists(roster.event_id));
        }
        rosters.insert(roster.id, roster.clone());
        Ok(roster)
    }

    async fn get_by_id(&self, id: Uuid) -> AttendanceResult<Option<AttendanceRoster>> {
        Ok(self.rosters.read().await.get(&id).cloned())
    }

    async fn find_by_event(&self, event_id: Uuid) -> AttendanceResult<Option<AttendanceRoster>> {
        Ok(self
            .rosters
            .read()
            .await
            .values()
            .find(|r| r.event_id == event_id)
            .cloned())
    }

    async fn list(&self) -> AttendanceResult<Vec<AttendanceRoster>> {
        let mut rosters: Vec<AttendanceRoster> =
            self.rosters.read().await.values().cloned().collect();
        rosters.sort_by_key(|r| r.created_at);
        Ok(rosters)
    }

    async fn append_attendee(
        &self,
        event_id: Uuid,
        attendance: Attendance,
        capacity: u32,
    ) -> AttendanceResult<AppendOutcome> {
        let mut rosters = self.rosters.write().await;
        let Some(roster) = rosters.values_mut().find(|r| r.event_id == event_id) else {
            return Ok(AppendOutcome::Missing);
        };

        if roster.contains(attendance.participant_id) {
            return Ok(AppendOutcome::AlreadyRegistered);
        }
        if roster.len() >= capacity as usize {
            return Ok(AppendOutcome::CapacityFull);
        }

        roster.attendees.push(attendance);
        roster.updated_at = Utc::now();
        Ok(AppendOutcome::Appended(roster.clone()))
    }

    async fn reassign(
        &self,
        id: Uuid,
        event_id: Uuid,
    ) -> AttendanceResult<Option<AttendanceRoster>> {
        let mut rosters = self.rosters.write().await;
        if rosters
            .values()
            .any(|r| r.event_id == event_id && r.id != id)
        {
            return Err(AttendanceError::RosterExists(event_id));
        }

        Ok(rosters.get_mut(&id).map(|roster| {
            roster.event_id = event_id;
            roster.updated_at = Utc::now();
            roster.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AttendanceResult<bool> {
        Ok(self.rosters.write().await.remove(&id).is_some())
    }

    async fn attendee_counts(&self) -> AttendanceResult<HashMap<Uuid, usize>> {
        Ok(self
            .rosters
            .read()
            .await
            .values()
            .map(|r| (r.event_id, r.len()))
            .collect())
    }
}
