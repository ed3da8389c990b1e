//! MongoDB implementation of ParticipantRepository

use async_trait::async_trait;
use database::mongodb::{is_duplicate_key_error, uuid_bson};
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Collection, Database, IndexModel};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{ParticipantError, ParticipantResult};
use crate::models::Participant;
use crate::repository::ParticipantRepository;

#[derive(Clone)]
pub struct MongoParticipantRepository {
    collection: Collection<Participant>,
}

impl MongoParticipantRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("participants"),
        }
    }

    /// Unique index on `email`
    pub async fn init_indexes(&self) -> ParticipantResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        info!("Participant indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl ParticipantRepository for MongoParticipantRepository {
    #[instrument(skip(self, participant), fields(participant_id = %participant.id))]
    async fn create(&self, participant: Participant) -> ParticipantResult<Participant> {
        match self.collection.insert_one(&participant).await {
            Ok(_) => Ok(participant),
            Err(e) if is_duplicate_key_error(&e) => {
                Err(ParticipantError::DuplicateEmail(participant.email))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ParticipantResult<Option<Participant>> {
        let filter = doc! { "_id": uuid_bson(id) };
        Ok(self.collection.find_one(filter).await?)
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> ParticipantResult<Option<Participant>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ParticipantResult<Vec<Participant>> {
        let options = FindOptions::builder().sort(doc! { "name": 1 }).build();
        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, participant), fields(participant_id = %participant.id))]
    async fn update(&self, participant: Participant) -> ParticipantResult<Option<Participant>> {
        let filter = doc! { "_id": uuid_bson(participant.id) };
        let result = match self.collection.replace_one(filter, &participant).await {
            Ok(result) => result,
            Err(e) if is_duplicate_key_error(&e) => {
                return Err(ParticipantError::DuplicateEmail(participant.email));
            }
            Err(e) => return Err(e.into()),
        };

        if result.matched_count == 0 {
            return Ok(None);
        }
        Ok(Some(participant))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ParticipantResult<bool> {
        let filter = doc! { "_id": uuid_bson(id) };
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateParticipant;
    use mongodb::bson::to_raw_document_buf;

    #[test]
    fn test_id_filter_matches_stored_participant() {
        let participant = Participant::new(CreateParticipant {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        });

        let stored = to_raw_document_buf(&participant)
            .unwrap()
            .to_document()
            .unwrap();

        assert_eq!(stored.get("_id"), Some(&uuid_bson(participant.id)));
        assert_eq!(stored.get_str("email").unwrap(), "ada@example.com");
    }
}
