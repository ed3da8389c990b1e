//! Participant service layer

use database::cache::{CacheClient, KeySpace};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ParticipantError, ParticipantResult};
use crate::models::{CreateParticipant, Participant, UpdateParticipant};
use crate::repository::ParticipantRepository;

/// Cache keys: `participants_all` and `participant_{id}`
pub const PARTICIPANTS: KeySpace = KeySpace::new("participant", "participants");

pub struct ParticipantService<R: ParticipantRepository> {
    repository: Arc<R>,
    cache: CacheClient,
}

impl<R: ParticipantRepository> ParticipantService<R> {
    pub fn new(repository: R, cache: CacheClient) -> Self {
        Self {
            repository: Arc::new(repository),
            cache,
        }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_participant(
        &self,
        input: CreateParticipant,
    ) -> ParticipantResult<Participant> {
        input
            .validate()
            .map_err(|e| ParticipantError::Validation(e.to_string()))?;

        if self.repository.get_by_email(&input.email).await?.is_some() {
            return Err(ParticipantError::DuplicateEmail(input.email));
        }

        let participant = self.repository.create(Participant::new(input)).await?;

        self.cache.invalidate(&[PARTICIPANTS.all()]).await;
        info!(participant_id = %participant.id, "Participant created");
        Ok(participant)
    }

    #[instrument(skip(self))]
    pub async fn get_participant(&self, id: Uuid) -> ParticipantResult<Participant> {
        self.cache
            .get_or_load(&PARTICIPANTS.entity(id), || async {
                self.repository
                    .get_by_id(id)
                    .await?
                    .ok_or(ParticipantError::NotFound(id))
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_participants(&self) -> ParticipantResult<Vec<Participant>> {
        self.cache
            .get_or_load(&PARTICIPANTS.all(), || self.repository.list())
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_participant(
        &self,
        id: Uuid,
        input: UpdateParticipant,
    ) -> ParticipantResult<Participant> {
        input
            .validate()
            .map_err(|e| ParticipantError::Validation(e.to_string()))?;

        let mut participant = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ParticipantError::NotFound(id))?;

        if let Some(email) = &input.email {
            let owner = self.repository.get_by_email(email).await?;
            if owner.is_some_and(|owner| owner.id != id) {
                return Err(ParticipantError::DuplicateEmail(email.clone()));
            }
        }

        participant.apply_update(input);
        let participant = self
            .repository
            .update(participant)
            .await?
            .ok_or(ParticipantError::NotFound(id))?;

        self.cache
            .invalidate(&[PARTICIPANTS.all(), PARTICIPANTS.entity(id)])
            .await;
        info!(participant_id = %id, "Participant updated");
        Ok(participant)
    }

    #[instrument(skip(self))]
    pub async fn delete_participant(&self, id: Uuid) -> ParticipantResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ParticipantError::NotFound(id));
        }

        self.cache
            .invalidate(&[PARTICIPANTS.all(), PARTICIPANTS.entity(id)])
            .await;
        info!(participant_id = %id, "Participant deleted");
        Ok(())
    }
}

impl<R: ParticipantRepository> Clone for ParticipantService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: self.cache.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockParticipantRepository;
    use mockall::predicate::*;
    use std::time::Duration;

    fn cache() -> CacheClient {
        CacheClient::in_memory(Duration::from_secs(60))
    }

    fn ada() -> Participant {
        Participant::new(CreateParticipant {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
    }

    #[tokio::test]
    async fn test_create_participant_success() {
        let mut mock_repo = MockParticipantRepository::new();
        mock_repo
            .expect_get_by_email()
            .with(eq("ada@example.com"))
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|participant| Ok(participant));

        let service = ParticipantService::new(mock_repo, cache());
        let participant = service
            .create_participant(CreateParticipant {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(participant.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_create_participant_duplicate_email() {
        let existing = ada();

        let mut mock_repo = MockParticipantRepository::new();
        mock_repo
            .expect_get_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_create().times(0);

        let service = ParticipantService::new(mock_repo, cache());
        let result = service
            .create_participant(CreateParticipant {
                name: "Someone".to_string(),
                email: "ada@example.com".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ParticipantError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_create_participant_invalid_email() {
        let mut mock_repo = MockParticipantRepository::new();
        mock_repo.expect_create().times(0);

        let service = ParticipantService::new(mock_repo, cache());
        let result = service
            .create_participant(CreateParticipant {
                name: "Ada".to_string(),
                email: "nope".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ParticipantError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_to_email_of_another_participant() {
        let target = ada();
        let id = target.id;
        let other = Participant::new(CreateParticipant {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
        });

        let mut mock_repo = MockParticipantRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(target.clone())));
        mock_repo
            .expect_get_by_email()
            .with(eq("grace@example.com"))
            .returning(move |_| Ok(Some(other.clone())));
        mock_repo.expect_update().times(0);

        let service = ParticipantService::new(mock_repo, cache());
        let result = service
            .update_participant(
                id,
                UpdateParticipant {
                    email: Some("grace@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ParticipantError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_get_participant_cached_until_delete() {
        let participant = ada();
        let id = participant.id;

        let mut mock_repo = MockParticipantRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(participant.clone())));
        mock_repo.expect_delete().times(1).returning(|_| Ok(true));

        let service = ParticipantService::new(mock_repo, cache());
        service.get_participant(id).await.unwrap();
        service.get_participant(id).await.unwrap();

        service.delete_participant(id).await.unwrap();
        assert!(
            service
                .cache
                .get_json::<Participant>(&PARTICIPANTS.entity(id))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_missing_participant() {
        let mut mock_repo = MockParticipantRepository::new();
        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = ParticipantService::new(mock_repo, cache());
        let result = service.delete_participant(Uuid::now_v7()).await;
        assert!(matches!(result, Err(ParticipantError::NotFound(_))));
    }
}
