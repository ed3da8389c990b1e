//! Repository and cache tests against real MongoDB and Redis containers.
//!
//! Require Docker: `cargo test -p domain_attendance -- --ignored`

use chrono::{NaiveDate, Utc};
use database::cache::{CacheClient, RedisCacheStore};
use domain_attendance::*;
use domain_events::{Event, EventRepository, MongoEventRepository};
use domain_participants::{
    CreateParticipant, MongoParticipantRepository, Participant, ParticipantRepository,
};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{TestDataBuilder, TestMongo, TestRedis};

fn attendance(builder: &TestDataBuilder, index: u8) -> Attendance {
    Attendance {
        participant_id: builder.id(index),
        attended_at: Utc::now(),
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_conditional_append_enforces_rules() {
    let mongo = TestMongo::new().await;
    let repo = MongoRosterRepository::new(&mongo.database());
    repo.init_indexes().await.unwrap();

    let builder = TestDataBuilder::from_test_name("test_conditional_append_enforces_rules");
    let event_id = builder.id(100);

    let first = attendance(&builder, 1);
    repo.create(AttendanceRoster::new(event_id, first.clone()))
        .await
        .unwrap();

    let duplicate = repo.append_attendee(event_id, first, 2).await.unwrap();
    assert_eq!(duplicate, AppendOutcome::AlreadyRegistered);

    let second = repo
        .append_attendee(event_id, attendance(&builder, 2), 2)
        .await
        .unwrap();
    assert!(matches!(second, AppendOutcome::Appended(ref r) if r.len() == 2));

    let full = repo
        .append_attendee(event_id, attendance(&builder, 3), 2)
        .await
        .unwrap();
    assert_eq!(full, AppendOutcome::CapacityFull);

    let counts = repo.attendee_counts().await.unwrap();
    assert_eq!(counts.get(&event_id), Some(&2));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_unique_event_index_rejects_second_roster() {
    let mongo = TestMongo::new().await;
    let repo = MongoRosterRepository::new(&mongo.database());
    repo.init_indexes().await.unwrap();

    let builder = TestDataBuilder::from_test_name("test_unique_event_index");
    let event_id = builder.id(100);

    repo.create(AttendanceRoster::new(event_id, attendance(&builder, 1)))
        .await
        .unwrap();
    let second = repo
        .create(AttendanceRoster::new(event_id, attendance(&builder, 2)))
        .await;

    assert!(matches!(second, Err(AttendanceError::RosterExists(id)) if id == event_id));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_concurrent_registrations_against_mongo_and_redis() {
    let mongo = TestMongo::new().await;
    let redis = TestRedis::new().await;
    let database = mongo.database();

    let events = MongoEventRepository::new(&database);
    let participants = MongoParticipantRepository::new(&database);
    let rosters = MongoRosterRepository::new(&database);
    events.init_indexes().await.unwrap();
    participants.init_indexes().await.unwrap();
    rosters.init_indexes().await.unwrap();

    let cache = CacheClient::new(
        Arc::new(RedisCacheStore::new(redis.connection())),
        Duration::from_secs(60),
    );
    let service = AttendanceService::new(
        rosters,
        Arc::new(events.clone()),
        Arc::new(participants.clone()),
        cache,
    );

    let date = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
    let event = events
        .create(Event::new("RustConf", date, 3))
        .await
        .unwrap();

    let builder = TestDataBuilder::from_test_name("test_concurrent_registrations");
    let mut handles = Vec::new();
    for i in 0..10 {
        let participant = participants
            .create(Participant::new(CreateParticipant {
                name: builder.name("participant", &i.to_string()),
                email: builder.email(&format!("p{}", i)),
            }))
            .await
            .unwrap();

        let service = service.clone();
        let event_id = event.id;
        handles.push(tokio::spawn(async move {
            service
                .register(RegisterAttendance {
                    event_id,
                    participant_id: participant.id,
                    attended_at: None,
                })
                .await
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 3);

    let stats = service.stats_for_event(event.id).await.unwrap();
    assert_eq!(stats.registered, 3);
    assert_eq!(stats.percentage, 100.0);

    let rosters = service.list_rosters().await.unwrap();
    assert_eq!(rosters.len(), 1);
    assert_eq!(rosters[0].attendees.len(), 3);
}
