//! Event service layer

use crate::error::{EventError, Result};
use crate::models::{CreateEvent, Event, EventDate, UpdateEvent};
use crate::repository::EventRepository;
use chrono::{NaiveDate, Utc};
use database::cache::{CacheClient, KeySpace};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Cache keys: `events_all` and `event_{id}`
pub const EVENTS: KeySpace = KeySpace::new("event", "events");

/// Event CRUD with read-through caching.
///
/// Reads go through the cache; every successful write invalidates the
/// collection key and, for updates and deletes, the entity key.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
    cache: CacheClient,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R, cache: CacheClient) -> Self {
        Self {
            repository: Arc::new(repository),
            cache,
        }
    }

    #[instrument(skip(self, input), fields(event_name = %input.name))]
    pub async fn create_event(&self, input: CreateEvent) -> Result<Event> {
        input.validate()?;
        let date = resolve_date(&input.date)?;

        let event = Event::new(input.name, date, input.capacity as u32);
        let event = self.repository.create(event).await?;

        self.cache.invalidate(&[EVENTS.all()]).await;
        info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, id: Uuid) -> Result<Event> {
        self.cache
            .get_or_load(&EVENTS.entity(id), || async {
                self.repository
                    .get_by_id(id)
                    .await?
                    .ok_or(EventError::NotFound { id })
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.cache
            .get_or_load(&EVENTS.all(), || self.repository.list())
            .await
    }

    /// Apply the present fields. Lowering capacity below the number of
    /// registered attendees is allowed.
    #[instrument(skip(self, input))]
    pub async fn update_event(&self, id: Uuid, input: UpdateEvent) -> Result<Event> {
        input.validate()?;

        let mut event = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound { id })?;

        if let Some(name) = input.name {
            event.name = name;
        }
        if let Some(date) = input.date {
            event.date = resolve_date(&date)?;
        }
        if let Some(capacity) = input.capacity {
            event.capacity = capacity as u32;
        }
        event.updated_at = Utc::now();

        let event = self
            .repository
            .update(event)
            .await?
            .ok_or(EventError::NotFound { id })?;

        self.cache.invalidate(&[EVENTS.all(), EVENTS.entity(id)]).await;
        info!(event_id = %id, "Event updated");
        Ok(event)
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(EventError::NotFound { id });
        }

        self.cache.invalidate(&[EVENTS.all(), EVENTS.entity(id)]).await;
        info!(event_id = %id, "Event deleted");
        Ok(())
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: self.cache.clone(),
        }
    }
}

fn resolve_date(date: &EventDate) -> Result<NaiveDate> {
    date.to_naive_date().ok_or(EventError::InvalidDate {
        day: date.day,
        month: date.month,
        year: date.year,
    })
}
