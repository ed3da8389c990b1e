//! In-process ParticipantRepository for tests and local development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ParticipantError, ParticipantResult};
use crate::models::Participant;
use crate::repository::ParticipantRepository;

/// Enforces email uniqueness the way the Mongo unique index does.
#[derive(Clone, Default)]
pub struct InMemoryParticipantRepository {
    participants: Arc<RwLock<HashMap<Uuid, Participant>>>,
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(participants: &HashMap<Uuid, Participant>, email: &str, except: Uuid) -> bool {
    participants
        .values()
        .any(|p| p.id != except && p.email == email)
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn create(&self, participant: Participant) -> ParticipantResult<Participant> {
        let mut participants = self.participants.write().await;
        if email_taken(&participants, &participant.email, participant.id) {
            return Err(ParticipantError::DuplicateEmail(participant.email));
        }
        participants.insert(participant.id, participant.clone());
        Ok(participant)
    }

    async fn get_by_id(&self, id: Uuid) -> ParticipantResult<Option<Participant>> {
        Ok(self.participants.read().await.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> ParticipantResult<Option<Participant>> {
        Ok(self
            .participants
            .read()
            .await
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn list(&self) -> ParticipantResult<Vec<Participant>> {
        let mut participants: Vec<Participant> =
            self.participants.read().await.values().cloned().collect();
        participants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(participants)
    }

    async fn update(&self, participant: Participant) -> ParticipantResult<Option<Participant>> {
        let mut participants = self.participants.write().await;
        if !participants.contains_key(&participant.id) {
            return Ok(None);
        }
        if email_taken(&participants, &participant.email, participant.id) {
            return Err(ParticipantError::DuplicateEmail(participant.email));
        }
        participants.insert(participant.id, participant.clone());
        Ok(Some(participant))
    }

    async fn delete(&self, id: Uuid) -> ParticipantResult<bool> {
        Ok(self.participants.write().await.remove(&id).is_some())
    }
}
