//! MongoDB implementation of RosterRepository
//!
//! Rosters live in `attendance_rosters` with a unique index on `event_id`.
//! Appends are a single `find_one_and_update` guarded by the duplicate and
//! capacity conditions, so concurrent writers in different processes cannot
//! overfill a roster.

use async_trait::async_trait;
use chrono::Utc;
use database::mongodb::{is_duplicate_key_error, uuid_bson};
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc, to_bson};
use mongodb::options::{FindOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{AppendOutcome, Attendance, AttendanceRoster};
use crate::repository::RosterRepository;

#[derive(Clone)]
pub struct MongoRosterRepository {
    collection: Collection<AttendanceRoster>,
}

#[derive(Deserialize)]
struct AttendeeCount {
    event_id: Uuid,
    count: i64,
}

impl MongoRosterRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("attendance_rosters"),
        }
    }

    /// Unique index on `event_id`
    pub async fn init_indexes(&self) -> AttendanceResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "event_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        info!("Attendance roster indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl RosterRepository for MongoRosterRepository {
    #[instrument(skip(self, roster), fields(roster_id = %roster.id, event_id = %roster.event_id))]
    async fn create(&self, roster: AttendanceRoster) -> AttendanceResult<AttendanceRoster> {
        match self.collection.insert_one(&roster).await {
            Ok(_) => Ok(roster),
            Err(e) if is_duplicate_key_error(&e) => {
                Err(AttendanceError::RosterExists(roster.event_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> AttendanceResult<Option<AttendanceRoster>> {
        let filter = doc! { "_id": uuid_bson(id) };
        Ok(self.collection.find_one(filter).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_event(&self, event_id: Uuid) -> AttendanceResult<Option<AttendanceRoster>> {
        let filter = doc! { "event_id": uuid_bson(event_id) };
        Ok(self.collection.find_one(filter).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> AttendanceResult<Vec<AttendanceRoster>> {
        let options = FindOptions::builder().sort(doc! { "created_at": 1 }).build();
        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, attendance), fields(participant_id = %attendance.participant_id))]
    async fn append_attendee(
        &self,
        event_id: Uuid,
        attendance: Attendance,
        capacity: u32,
    ) -> AttendanceResult<AppendOutcome> {
        let participant_id = attendance.participant_id;
        let filter = append_filter(event_id, participant_id, capacity);
        let update = append_update(&attendance)?;

        let updated = self
            .collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?;

        if let Some(roster) = updated {
            return Ok(AppendOutcome::Appended(roster));
        }

        // the guard rejected the write; find out which condition failed
        debug!(%event_id, "Conditional append matched no roster");
        Ok(match self.find_by_event(event_id).await? {
            None => AppendOutcome::Missing,
            Some(roster) if roster.contains(participant_id) => AppendOutcome::AlreadyRegistered,
            Some(_) => AppendOutcome::CapacityFull,
        })
    }

    #[instrument(skip(self))]
    async fn reassign(
        &self,
        id: Uuid,
        event_id: Uuid,
    ) -> AttendanceResult<Option<AttendanceRoster>> {
        let filter = doc! { "_id": uuid_bson(id) };
        let update = doc! {
            "$set": {
                "event_id": uuid_bson(event_id),
                "updated_at": to_bson(&Utc::now())?,
            }
        };

        match self
            .collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
        {
            Ok(roster) => Ok(roster),
            Err(e) if is_duplicate_key_error(&e) => Err(AttendanceError::RosterExists(event_id)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> AttendanceResult<bool> {
        let filter = doc! { "_id": uuid_bson(id) };
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn attendee_counts(&self) -> AttendanceResult<HashMap<Uuid, usize>> {
        let pipeline = vec![doc! {
            "$project": {
                "_id": 0,
                "event_id": 1,
                "count": { "$size": "$attendees" },
            }
        }];

        // typed so `event_id` goes through the same binary decoding as reads
        let rows: Vec<AttendeeCount> = self
            .collection
            .aggregate(pipeline)
            .with_type::<AttendeeCount>()
            .await?
            .try_collect()
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.event_id, usize::try_from(row.count).unwrap_or(0)))
            .collect())
    }
}

/// Matches the event's roster only while the participant is absent and a
/// seat is free.
fn append_filter(event_id: Uuid, participant_id: Uuid, capacity: u32) -> Document {
    doc! {
        "event_id": uuid_bson(event_id),
        "attendees.participant_id": { "$ne": uuid_bson(participant_id) },
        "$expr": { "$lt": [{ "$size": "$attendees" }, i64::from(capacity)] },
    }
}

/// Pushed entries must be encoded exactly like the ones `insert_one` writes.
fn append_update(attendance: &Attendance) -> AttendanceResult<Document> {
    Ok(doc! {
        "$push": {
            "attendees": {
                "participant_id": uuid_bson(attendance.participant_id),
                "attended_at": to_bson(&attendance.attended_at)?,
            }
        },
        "$set": { "updated_at": to_bson(&Utc::now())? },
    })
}
