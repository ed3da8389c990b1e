//! Per-event mutual exclusion for roster mutations.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Keyed async mutexes, one per event id.
///
/// Entries are created on demand and pruned when the last guard for an event
/// is dropped, so the map only holds events with in-flight mutations.
#[derive(Clone, Default)]
pub struct EventLocks {
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl EventLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `event_id`.
    pub async fn lock(&self, event_id: Uuid) -> EventGuard {
        // clone out of the shard before awaiting
        let mutex = self
            .locks
            .entry(event_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        EventGuard {
            guard: Some(mutex.lock_owned().await),
            locks: Arc::clone(&self.locks),
            event_id,
        }
    }

    /// Lock two events in id order; a single guard when they are equal.
    pub async fn lock_pair(&self, a: Uuid, b: Uuid) -> Vec<EventGuard> {
        if a == b {
            return vec![self.lock(a).await];
        }

        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let first = self.lock(first).await;
        let second = self.lock(second).await;
        vec![first, second]
    }

    /// Number of events with a live lock entry
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

pub struct EventGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
    event_id: Uuid,
}

impl Drop for EventGuard {
    fn drop(&mut self) {
        // release first so the map holds the only reference when idle
        drop(self.guard.take());
        self.locks
            .remove_if(&self.event_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
