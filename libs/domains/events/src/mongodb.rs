//! MongoDB implementation of EventRepository

use crate::error::Result;
use crate::models::Event;
use crate::repository::EventRepository;
use async_trait::async_trait;
use database::mongodb::uuid_bson;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database, IndexModel};
use tracing::{info, instrument};
use uuid::Uuid;

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<Event>,
}

impl MongoEventRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("events"),
        }
    }

    /// Index for the date-ordered listing
    pub async fn init_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "date": 1, "name": 1 })
            .build();

        self.collection.create_index(index).await?;
        info!("Event indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: Event) -> Result<Event> {
        self.collection.insert_one(&event).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let filter = doc! { "_id": uuid_bson(id) };
        let event = self.collection.find_one(filter).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Event>> {
        let options = FindOptions::builder()
            .sort(doc! { "date": 1, "name": 1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let events: Vec<Event> = cursor.try_collect().await?;
        Ok(events)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: Event) -> Result<Option<Event>> {
        let filter = doc! { "_id": uuid_bson(event.id) };
        let result = self.collection.replace_one(filter, &event).await?;

        if result.matched_count == 0 {
            return Ok(None);
        }
        Ok(Some(event))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool> {
        let filter = doc! { "_id": uuid_bson(id) };
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mongodb::bson::to_raw_document_buf;

    #[test]
    fn test_id_filter_matches_stored_event() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
        let event = Event::new("RustConf", date, 10);

        let stored = to_raw_document_buf(&event).unwrap().to_document().unwrap();

        assert_eq!(stored.get("_id"), Some(&uuid_bson(event.id)));
        // date sort relies on ISO strings
        assert_eq!(stored.get_str("date").unwrap(), "2025-09-10");
    }
}
