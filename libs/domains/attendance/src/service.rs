//! Attendance registry
//!
//! Owns the per-event rosters. Registration runs under the event's lock and
//! finishes with a conditional write, so a roster never exceeds its event's
//! capacity and never lists a participant twice.

use chrono::Utc;
use database::cache::{CacheClient, KeySpace};
use domain_events::{EVENTS, Event, EventRepository};
use domain_participants::{PARTICIPANTS, Participant, ParticipantRepository};
use futures_util::future::try_join_all;
use observability::attendance::{AttendanceMetrics, RegistrationOutcome};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};
use crate::locks::EventLocks;
use crate::models::{
    AppendOutcome, Attendance, AttendanceRoster, AttendeeDetails, RegisterAttendance,
    Registration, RosterDetails, UpdateRoster, parse_attended_at,
};
use crate::repository::RosterRepository;

/// Cache keys: `rosters_all` and `roster_{id}`
pub const ROSTERS: KeySpace = KeySpace::new("roster", "rosters");

pub struct AttendanceService<R: RosterRepository> {
    pub(crate) repository: Arc<R>,
    pub(crate) events: Arc<dyn EventRepository>,
    participants: Arc<dyn ParticipantRepository>,
    cache: CacheClient,
    locks: EventLocks,
}

impl<R: RosterRepository> AttendanceService<R> {
    /// Event and participant lookups go straight to their repositories so
    /// capacity checks never see a cached event.
    pub fn new(
        repository: R,
        events: Arc<dyn EventRepository>,
        participants: Arc<dyn ParticipantRepository>,
        cache: CacheClient,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            events,
            participants,
            cache,
            locks: EventLocks::new(),
        }
    }

    /// Add a participant to an event's roster, creating the roster on first use.
    #[instrument(skip(self, input), fields(event_id = %input.event_id, participant_id = %input.participant_id))]
    pub async fn register(&self, input: RegisterAttendance) -> AttendanceResult<Registration> {
        let result = self.try_register(input).await;

        let outcome = match &result {
            Ok(_) => RegistrationOutcome::Registered,
            Err(AttendanceError::AlreadyRegistered { .. }) => {
                RegistrationOutcome::AlreadyRegistered
            }
            Err(AttendanceError::CapacityFull { .. }) => RegistrationOutcome::CapacityFull,
            Err(AttendanceError::Database(_) | AttendanceError::Internal(_)) => {
                RegistrationOutcome::Failed
            }
            Err(_) => RegistrationOutcome::Rejected,
        };
        AttendanceMetrics::record_registration(outcome);

        result
    }

    async fn try_register(&self, input: RegisterAttendance) -> AttendanceResult<Registration> {
        let attended_at = match input.attended_at.as_deref() {
            Some(raw) => parse_attended_at(raw)?,
            None => Utc::now(),
        };

        let event = self
            .events
            .get_by_id(input.event_id)
            .await?
            .ok_or(AttendanceError::EventNotFound(input.event_id))?;
        self.participants
            .get_by_id(input.participant_id)
            .await?
            .ok_or(AttendanceError::ParticipantNotFound(input.participant_id))?;

        let attendance = Attendance {
            participant_id: input.participant_id,
            attended_at,
        };

        let roster = {
            let _guard = self.locks.lock(event.id).await;
            self.append(&event, attendance).await?
        };

        self.cache
            .invalidate(&[ROSTERS.all(), ROSTERS.entity(roster.id)])
            .await;

        info!(
            roster_id = %roster.id,
            registered = roster.len(),
            capacity = event.capacity,
            "Participant registered"
        );

        Ok(Registration {
            roster_id: roster.id,
            event_id: event.id,
            participant_id: input.participant_id,
            attended_at,
            registered: roster.len(),
            capacity: event.capacity,
        })
    }

    /// Dedup and capacity checks followed by the conditional write.
    /// Caller holds the event lock.
    async fn append(
        &self,
        event: &Event,
        attendance: Attendance,
    ) -> AttendanceResult<AttendanceRoster> {
        let participant_id = attendance.participant_id;
        let already_registered = AttendanceError::AlreadyRegistered {
            event_id: event.id,
            participant_id,
        };
        let capacity_full = AttendanceError::CapacityFull {
            event_id: event.id,
            capacity: event.capacity,
        };

        match self.repository.find_by_event(event.id).await? {
            Some(roster) if roster.contains(participant_id) => return Err(already_registered),
            Some(roster) if roster.len() >= event.capacity as usize => return Err(capacity_full),
            Some(_) => {}
            None if event.capacity == 0 => return Err(capacity_full),
            None => {
                let roster = AttendanceRoster::new(event.id, attendance.clone());
                match self.repository.create(roster).await {
                    Ok(roster) => return Ok(roster),
                    // another process created it first
                    Err(AttendanceError::RosterExists(_)) => {
                        warn!(event_id = %event.id, "Roster created concurrently, appending");
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        match self
            .repository
            .append_attendee(event.id, attendance, event.capacity)
            .await?
        {
            AppendOutcome::Appended(roster) => Ok(roster),
            AppendOutcome::AlreadyRegistered => Err(already_registered),
            AppendOutcome::CapacityFull => Err(capacity_full),
            AppendOutcome::Missing => Err(AttendanceError::Internal(format!(
                "roster for event {} disappeared during registration",
                event.id
            ))),
        }
    }

    /// The roster is cached bare; its event and participants are joined on
    /// every read so directory writes show up immediately.
    #[instrument(skip(self))]
    pub async fn get_roster(&self, id: Uuid) -> AttendanceResult<RosterDetails> {
        let roster = self
            .cache
            .get_or_load(&ROSTERS.entity(id), || async {
                self.repository
                    .get_by_id(id)
                    .await?
                    .ok_or(AttendanceError::RosterNotFound(id))
            })
            .await?;

        self.resolve(roster).await
    }

    #[instrument(skip(self))]
    pub async fn list_rosters(&self) -> AttendanceResult<Vec<RosterDetails>> {
        let rosters: Vec<AttendanceRoster> = self
            .cache
            .get_or_load(&ROSTERS.all(), || self.repository.list())
            .await?;

        try_join_all(rosters.into_iter().map(|roster| self.resolve(roster))).await
    }

    /// Move a roster to another event.
    ///
    /// The target event must exist, have no roster of its own and fit every
    /// current attendee. Both events are locked for the duration.
    #[instrument(skip(self, input))]
    pub async fn update_roster(
        &self,
        id: Uuid,
        input: UpdateRoster,
    ) -> AttendanceResult<RosterDetails> {
        let roster = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(AttendanceError::RosterNotFound(id))?;

        let target_id = match input.event_id {
            Some(target_id) if target_id != roster.event_id => target_id,
            _ => return self.resolve(roster).await,
        };

        let target = self
            .events
            .get_by_id(target_id)
            .await?
            .ok_or(AttendanceError::EventNotFound(target_id))?;

        let updated = {
            let _guards = self.locks.lock_pair(roster.event_id, target_id).await;

            // re-read under the locks
            let roster = self
                .repository
                .get_by_id(id)
                .await?
                .ok_or(AttendanceError::RosterNotFound(id))?;

            if self.repository.find_by_event(target_id).await?.is_some() {
                return Err(AttendanceError::RosterExists(target_id));
            }
            if roster.len() > target.capacity as usize {
                return Err(AttendanceError::CapacityFull {
                    event_id: target_id,
                    capacity: target.capacity,
                });
            }

            self.repository
                .reassign(id, target_id)
                .await?
                .ok_or(AttendanceError::RosterNotFound(id))?
        };

        self.cache
            .invalidate(&[ROSTERS.all(), ROSTERS.entity(id)])
            .await;
        info!(roster_id = %id, event_id = %target_id, "Roster reassigned");

        self.resolve(updated).await
    }

    #[instrument(skip(self))]
    pub async fn remove_roster(&self, id: Uuid) -> AttendanceResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AttendanceError::RosterNotFound(id));
        }

        self.cache
            .invalidate(&[ROSTERS.all(), ROSTERS.entity(id)])
            .await;
        AttendanceMetrics::record_roster_removed();
        info!(roster_id = %id, "Roster removed");
        Ok(())
    }

    /// Join a roster with its event and participants; deleted records become `None`.
    async fn resolve(&self, roster: AttendanceRoster) -> AttendanceResult<RosterDetails> {
        let event = self.lookup_event(roster.event_id).await?;

        let attendees = try_join_all(roster.attendees.into_iter().map(|entry| async move {
            let participant = self.lookup_participant(entry.participant_id).await?;
            Ok::<_, AttendanceError>(AttendeeDetails {
                participant_id: entry.participant_id,
                attended_at: entry.attended_at,
                participant,
            })
        }))
        .await?;

        Ok(RosterDetails {
            id: roster.id,
            event_id: roster.event_id,
            event,
            attendees,
            created_at: roster.created_at,
            updated_at: roster.updated_at,
        })
    }

    /// Reads through the `event_{id}` entry the event directory invalidates.
    async fn lookup_event(&self, id: Uuid) -> AttendanceResult<Option<Event>> {
        let key = EVENTS.entity(id);
        if let Some(event) = self.cache.get_json::<Event>(&key).await {
            return Ok(Some(event));
        }

        let event = self.events.get_by_id(id).await?;
        if let Some(event) = &event {
            self.cache.set_json(&key, event).await;
        }
        Ok(event)
    }

    async fn lookup_participant(&self, id: Uuid) -> AttendanceResult<Option<Participant>> {
        let key = PARTICIPANTS.entity(id);
        if let Some(participant) = self.cache.get_json::<Participant>(&key).await {
            return Ok(Some(participant));
        }

        let participant = self.participants.get_by_id(id).await?;
        if let Some(participant) = &participant {
            self.cache.set_json(&key, participant).await;
        }
        Ok(participant)
    }
}

impl<R: RosterRepository> Clone for AttendanceService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            events: Arc::clone(&self.events),
            participants: Arc::clone(&self.participants),
            cache: self.cache.clone(),
            locks: self.locks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRosterRepository;
    use crate::repository::MockRosterRepository;
    use chrono::NaiveDate;
    use domain_events::{EventService, InMemoryEventRepository, UpdateEvent};
    use domain_participants::{
        CreateParticipant, InMemoryParticipantRepository, Participant, ParticipantService,
    };
    use std::time::Duration;

    struct Fixture<R: RosterRepository> {
        service: AttendanceService<R>,
        events: InMemoryEventRepository,
        participants: InMemoryParticipantRepository,
        cache: CacheClient,
    }

    fn fixture_with<R: RosterRepository>(repository: R) -> Fixture<R> {
        let events = InMemoryEventRepository::new();
        let participants = InMemoryParticipantRepository::new();
        let cache = CacheClient::in_memory(Duration::from_secs(60));
        let service = AttendanceService::new(
            repository,
            Arc::new(events.clone()),
            Arc::new(participants.clone()),
            cache.clone(),
        );
        Fixture {
            service,
            events,
            participants,
            cache,
        }
    }

    fn fixture() -> Fixture<InMemoryRosterRepository> {
        fixture_with(InMemoryRosterRepository::new())
    }

    impl<R: RosterRepository> Fixture<R> {
        async fn event(&self, capacity: u32) -> Event {
            let date = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
            self.events
                .create(Event::new("RustConf", date, capacity))
                .await
                .unwrap()
        }

        async fn participant(&self, name: &str) -> Participant {
            self.participants
                .create(Participant::new(CreateParticipant {
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                }))
                .await
                .unwrap()
        }

        async fn register(
            &self,
            event: &Event,
            participant: &Participant,
        ) -> AttendanceResult<Registration> {
            self.service
                .register(RegisterAttendance {
                    event_id: event.id,
                    participant_id: participant.id,
                    attended_at: None,
                })
                .await
        }
    }

    #[tokio::test]
    async fn test_capacity_two_scenario() {
        let fx = fixture();
        let event = fx.event(2).await;
        let a = fx.participant("Ada").await;
        let b = fx.participant("Bob").await;
        let c = fx.participant("Cy").await;

        let first = fx.register(&event, &a).await.unwrap();
        assert_eq!(first.registered, 1);
        assert_eq!(first.capacity, 2);

        let again = fx.register(&event, &a).await;
        assert!(matches!(again, Err(AttendanceError::AlreadyRegistered { .. })));

        let second = fx.register(&event, &b).await.unwrap();
        assert_eq!(second.registered, 2);
        assert_eq!(second.roster_id, first.roster_id);

        let third = fx.register(&event, &c).await;
        assert!(matches!(third, Err(AttendanceError::CapacityFull { capacity: 2, .. })));

        let roster = fx.service.get_roster(first.roster_id).await.unwrap();
        assert_eq!(roster.attendees.len(), 2);
    }

    #[tokio::test]
    async fn test_capacity_zero_rejects_first_registration() {
        let fx = fixture();
        let event = fx.event(0).await;
        let a = fx.participant("Ada").await;

        let result = fx.register(&event, &a).await;
        assert!(matches!(result, Err(AttendanceError::CapacityFull { .. })));

        let stats = fx.service.stats_for_event(event.id).await.unwrap();
        assert_eq!(stats.registered, 0);
        assert_eq!(stats.percentage, 0.0);
    }

    #[tokio::test]
    async fn test_unknown_event_checked_before_participant() {
        let fx = fixture();
        let result = fx
            .service
            .register(RegisterAttendance {
                event_id: Uuid::now_v7(),
                participant_id: Uuid::now_v7(),
                attended_at: None,
            })
            .await;
        assert!(matches!(result, Err(AttendanceError::EventNotFound(_))));

        let event = fx.event(5).await;
        let result = fx
            .service
            .register(RegisterAttendance {
                event_id: event.id,
                participant_id: Uuid::now_v7(),
                attended_at: None,
            })
            .await;
        assert!(matches!(result, Err(AttendanceError::ParticipantNotFound(_))));
    }

    #[tokio::test]
    async fn test_bad_timestamp_rejected_before_lookups() {
        let fx = fixture();
        let result = fx
            .service
            .register(RegisterAttendance {
                event_id: Uuid::now_v7(),
                participant_id: Uuid::now_v7(),
                attended_at: Some("next tuesday".to_string()),
            })
            .await;
        assert!(matches!(result, Err(AttendanceError::InvalidTimestamp(_))));
    }

    #[tokio::test]
    async fn test_explicit_attended_at_is_kept() {
        let fx = fixture();
        let event = fx.event(5).await;
        let a = fx.participant("Ada").await;

        let registration = fx
            .service
            .register(RegisterAttendance {
                event_id: event.id,
                participant_id: a.id,
                attended_at: Some("2025-09-10".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(
            registration.attended_at.to_rfc3339(),
            "2025-09-10T00:00:00+00:00"
        );
    }

    #[tokio::test]
    async fn test_stats_three_of_ten() {
        let fx = fixture();
        let event = fx.event(10).await;
        for name in ["Ada", "Bob", "Cy"] {
            let p = fx.participant(name).await;
            fx.register(&event, &p).await.unwrap();
        }

        let stats = fx.service.stats_for_event(event.id).await.unwrap();
        assert_eq!(stats.registered, 3);
        assert_eq!(stats.percentage, 30.0);
        assert_eq!(stats.name, "RustConf");
    }

    #[tokio::test]
    async fn test_global_totals_match_details() {
        let fx = fixture();
        let small = fx.event(4).await;
        let large = fx.event(6).await;
        fx.event(0).await;

        let ada = fx.participant("Ada").await;
        let bob = fx.participant("Bob").await;
        fx.register(&small, &ada).await.unwrap();
        fx.register(&large, &ada).await.unwrap();
        fx.register(&large, &bob).await.unwrap();

        let stats = fx.service.stats_all_events().await.unwrap();
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.total_capacity, 10);
        assert_eq!(stats.total_registered, 3);
        assert_eq!(
            stats.total_registered,
            stats.details.iter().map(|d| d.registered as u64).sum::<u64>()
        );
        assert_eq!(stats.average_occupancy_percentage, 30.0);
    }

    #[tokio::test]
    async fn test_stats_ignore_rosters_of_deleted_events() {
        let fx = fixture();
        let event = fx.event(2).await;
        let ada = fx.participant("Ada").await;
        fx.register(&event, &ada).await.unwrap();

        fx.events.delete(event.id).await.unwrap();

        let stats = fx.service.stats_all_events().await.unwrap();
        assert_eq!(stats.total_events, 0);
        assert_eq!(stats.total_registered, 0);
        assert_eq!(stats.average_occupancy_percentage, 0.0);
    }

    #[tokio::test]
    async fn test_roster_cache_refreshed_after_registration() {
        let fx = fixture();
        let event = fx.event(5).await;
        let ada = fx.participant("Ada").await;
        let bob = fx.participant("Bob").await;

        let registration = fx.register(&event, &ada).await.unwrap();
        let before = fx.service.get_roster(registration.roster_id).await.unwrap();
        assert_eq!(before.attendees.len(), 1);
        assert_eq!(fx.service.list_rosters().await.unwrap()[0].attendees.len(), 1);

        fx.register(&event, &bob).await.unwrap();

        let after = fx.service.get_roster(registration.roster_id).await.unwrap();
        assert_eq!(after.attendees.len(), 2);
        assert_eq!(fx.service.list_rosters().await.unwrap()[0].attendees.len(), 2);
    }

    #[tokio::test]
    async fn test_deleted_participant_resolves_to_null() {
        let fx = fixture();
        let event = fx.event(5).await;
        let ada = fx.participant("Ada").await;
        let registration = fx.register(&event, &ada).await.unwrap();

        fx.participants.delete(ada.id).await.unwrap();

        let roster = fx.service.get_roster(registration.roster_id).await.unwrap();
        assert_eq!(roster.attendees[0].participant_id, ada.id);
        assert!(roster.attendees[0].participant.is_none());
        assert_eq!(roster.event.as_ref().map(|e| e.id), Some(event.id));
    }

    #[tokio::test]
    async fn test_cached_roster_reflects_directory_writes() {
        let fx = fixture();
        let event = fx.event(5).await;
        let ada = fx.participant("Ada").await;
        let registration = fx.register(&event, &ada).await.unwrap();

        let events = EventService::new(fx.events.clone(), fx.cache.clone());
        let participants = ParticipantService::new(fx.participants.clone(), fx.cache.clone());

        let before = fx.service.get_roster(registration.roster_id).await.unwrap();
        assert_eq!(before.event.as_ref().map(|e| e.name.as_str()), Some("RustConf"));
        assert!(before.attendees[0].participant.is_some());
        assert!(fx.service.list_rosters().await.unwrap()[0].attendees[0].participant.is_some());

        events
            .update_event(
                event.id,
                UpdateEvent {
                    name: Some("RustConf EU".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        participants.delete_participant(ada.id).await.unwrap();

        let after = fx.service.get_roster(registration.roster_id).await.unwrap();
        assert_eq!(after.event.as_ref().map(|e| e.name.as_str()), Some("RustConf EU"));
        assert_eq!(after.attendees[0].participant_id, ada.id);
        assert!(after.attendees[0].participant.is_none());

        let listed = fx.service.list_rosters().await.unwrap();
        assert!(listed[0].attendees[0].participant.is_none());

        events.delete_event(event.id).await.unwrap();
        let orphaned = fx.service.get_roster(registration.roster_id).await.unwrap();
        assert!(orphaned.event.is_none());
        assert_eq!(orphaned.event_id, event.id);
    }

    #[tokio::test]
    async fn test_concurrent_registrations_never_exceed_capacity() {
        let fx = fixture();
        let event = fx.event(5).await;

        let mut participants = Vec::new();
        for i in 0..20 {
            participants.push(fx.participant(&format!("P{i}")).await);
        }

        let service = fx.service.clone();
        let handles: Vec<_> = participants
            .into_iter()
            .map(|p| {
                let service = service.clone();
                let event_id = event.id;
                tokio::spawn(async move {
                    service
                        .register(RegisterAttendance {
                            event_id,
                            participant_id: p.id,
                            attended_at: None,
                        })
                        .await
                })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(e) => assert!(matches!(e, AttendanceError::CapacityFull { .. })),
            }
        }

        assert_eq!(accepted, 5);
        let stats = fx.service.stats_for_event(event.id).await.unwrap();
        assert_eq!(stats.registered, 5);
    }

    #[tokio::test]
    async fn test_update_roster_rules() {
        let fx = fixture();
        let original = fx.event(5).await;
        let tiny = fx.event(1).await;
        let taken = fx.event(5).await;
        let roomy = fx.event(10).await;

        let ada = fx.participant("Ada").await;
        let bob = fx.participant("Bob").await;
        let roster_id = fx.register(&original, &ada).await.unwrap().roster_id;
        fx.register(&original, &bob).await.unwrap();
        fx.register(&taken, &ada).await.unwrap();

        let unchanged = fx
            .service
            .update_roster(roster_id, UpdateRoster::default())
            .await
            .unwrap();
        assert_eq!(unchanged.event_id, original.id);

        let too_small = fx
            .service
            .update_roster(roster_id, UpdateRoster { event_id: Some(tiny.id) })
            .await;
        assert!(matches!(too_small, Err(AttendanceError::CapacityFull { .. })));

        let occupied = fx
            .service
            .update_roster(roster_id, UpdateRoster { event_id: Some(taken.id) })
            .await;
        assert!(matches!(occupied, Err(AttendanceError::RosterExists(_))));

        let missing = fx
            .service
            .update_roster(roster_id, UpdateRoster { event_id: Some(Uuid::now_v7()) })
            .await;
        assert!(matches!(missing, Err(AttendanceError::EventNotFound(_))));

        let moved = fx
            .service
            .update_roster(roster_id, UpdateRoster { event_id: Some(roomy.id) })
            .await
            .unwrap();
        assert_eq!(moved.event_id, roomy.id);
        assert_eq!(moved.attendees.len(), 2);

        let cached = fx.service.get_roster(roster_id).await.unwrap();
        assert_eq!(cached.event_id, roomy.id);
    }

    #[tokio::test]
    async fn test_remove_roster() {
        let fx = fixture();
        let event = fx.event(5).await;
        let ada = fx.participant("Ada").await;
        let roster_id = fx.register(&event, &ada).await.unwrap().roster_id;

        fx.service.get_roster(roster_id).await.unwrap();
        fx.service.remove_roster(roster_id).await.unwrap();

        let result = fx.service.get_roster(roster_id).await;
        assert!(matches!(result, Err(AttendanceError::RosterNotFound(_))));

        // the event can start a fresh roster
        let again = fx.register(&event, &ada).await.unwrap();
        assert_ne!(again.roster_id, roster_id);
        assert_eq!(again.registered, 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_roster_keeps_cache() {
        let mut mock_repo = MockRosterRepository::new();
        mock_repo.expect_list().times(1).returning(|| Ok(vec![]));
        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let fx = fixture_with(mock_repo);
        assert!(fx.service.list_rosters().await.unwrap().is_empty());

        let result = fx.service.remove_roster(Uuid::now_v7()).await;
        assert!(matches!(result, Err(AttendanceError::RosterNotFound(_))));

        // still served from cache: list() is expected exactly once
        assert!(fx.service.list_rosters().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lost_create_race_falls_back_to_append() {
        let mut mock_repo = MockRosterRepository::new();
        mock_repo
            .expect_find_by_event()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|roster| Err(AttendanceError::RosterExists(roster.event_id)));
        mock_repo
            .expect_append_attendee()
            .times(1)
            .returning(|event_id, attendance, _| {
                let mut roster = AttendanceRoster::new(
                    event_id,
                    Attendance {
                        participant_id: Uuid::now_v7(),
                        attended_at: Utc::now(),
                    },
                );
                roster.attendees.push(attendance);
                Ok(AppendOutcome::Appended(roster))
            });

        let fx = fixture_with(mock_repo);
        let event = fx.event(5).await;
        let ada = fx.participant("Ada").await;

        let registration = fx.register(&event, &ada).await.unwrap();
        assert_eq!(registration.registered, 2);
    }

    #[tokio::test]
    async fn test_database_failure_is_infrastructure_error() {
        let mut mock_repo = MockRosterRepository::new();
        mock_repo
            .expect_find_by_event()
            .returning(|_| Err(AttendanceError::Database("connection reset".into())));

        let fx = fixture_with(mock_repo);
        let event = fx.event(5).await;
        let ada = fx.participant("Ada").await;

        let result = fx.register(&event, &ada).await;
        assert!(matches!(result, Err(AttendanceError::Database(_))));
    }
}
