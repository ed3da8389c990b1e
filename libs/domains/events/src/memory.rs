//! In-process EventRepository for tests and local development

use crate::error::Result;
use crate::models::Event;
use crate::repository::EventRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: Event) -> Result<Event> {
        self.events.write().await.insert(event.id, event.clone());
        Ok(event)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self.events.read().await.values().cloned().collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        Ok(events)
    }

    async fn update(&self, event: Event) -> Result<Option<Event>> {
        let mut events = self.events.write().await;
        match events.get_mut(&event.id) {
            Some(stored) => {
                *stored = event.clone();
                Ok(Some(event))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.events.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[tokio::test]
    async fn test_list_is_date_ordered() {
        let repo = InMemoryEventRepository::new();
        repo.create(Event::new("late", day(20), 5)).await.unwrap();
        repo.create(Event::new("early", day(1), 5)).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["early", "late"]);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryEventRepository::new();
        let event = Event::new("ghost", day(1), 1);
        assert!(repo.update(event).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryEventRepository::new();
        let event = repo.create(Event::new("shared", day(2), 1)).await.unwrap();

        let other = repo.clone();
        assert!(other.delete(event.id).await.unwrap());
        assert!(repo.get_by_id(event.id).await.unwrap().is_none());
    }
}
