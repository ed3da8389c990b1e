use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ParticipantResult;
use crate::models::Participant;

/// Repository trait for Participant persistence
///
/// `create` and `update` fail with `DuplicateEmail` when another participant
/// already owns the email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    async fn create(&self, participant: Participant) -> ParticipantResult<Participant>;

    async fn get_by_id(&self, id: Uuid) -> ParticipantResult<Option<Participant>>;

    async fn get_by_email(&self, email: &str) -> ParticipantResult<Option<Participant>>;

    /// All participants ordered by name
    async fn list(&self) -> ParticipantResult<Vec<Participant>>;

    /// Replace a stored participant; `None` when it no longer exists
    async fn update(&self, participant: Participant) -> ParticipantResult<Option<Participant>>;

    async fn delete(&self, id: Uuid) -> ParticipantResult<bool>;
}
