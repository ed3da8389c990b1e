//! Event repository trait

use crate::error::Result;
use crate::models::Event;
use async_trait::async_trait;
use uuid::Uuid;

/// Durable storage for events.
///
/// Other domains hold this as `Arc<dyn EventRepository>` to read events
/// without going through the cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a new event
    async fn create(&self, event: Event) -> Result<Event>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>>;

    /// All events ordered by date, then name
    async fn list(&self) -> Result<Vec<Event>>;

    /// Replace a stored event; `None` when it no longer exists
    async fn update(&self, event: Event) -> Result<Option<Event>>;

    /// `false` when nothing was deleted
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
