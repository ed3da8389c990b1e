//! Occupancy statistics.
//!
//! Computed from the event directory and roster sizes on every call; never
//! cached.

use tracing::instrument;
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{EventStats, GlobalStats};
use crate::repository::RosterRepository;
use crate::service::AttendanceService;

/// `registered / capacity * 100` rounded to two decimals; 0 when capacity is 0.
pub fn occupancy_percentage(registered: u64, capacity: u64) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    round2(registered as f64 / capacity as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl<R: RosterRepository> AttendanceService<R> {
    #[instrument(skip(self))]
    pub async fn stats_for_event(&self, event_id: Uuid) -> AttendanceResult<EventStats> {
        let event = self
            .events
            .get_by_id(event_id)
            .await?
            .ok_or(AttendanceError::EventNotFound(event_id))?;

        let registered = self
            .repository
            .find_by_event(event_id)
            .await?
            .map_or(0, |roster| roster.len());

        Ok(EventStats {
            event_id,
            name: event.name,
            capacity: event.capacity,
            registered,
            percentage: occupancy_percentage(registered as u64, u64::from(event.capacity)),
        })
    }

    /// Per-event stats plus totals. Rosters of deleted events are ignored.
    #[instrument(skip(self))]
    pub async fn stats_all_events(&self) -> AttendanceResult<GlobalStats> {
        let events = self.events.list().await?;
        let counts = self.repository.attendee_counts().await?;

        let details: Vec<EventStats> = events
            .into_iter()
            .map(|event| {
                let registered = counts.get(&event.id).copied().unwrap_or(0);
                EventStats {
                    event_id: event.id,
                    percentage: occupancy_percentage(
                        registered as u64,
                        u64::from(event.capacity),
                    ),
                    name: event.name,
                    capacity: event.capacity,
                    registered,
                }
            })
            .collect();

        let total_capacity: u64 = details.iter().map(|s| u64::from(s.capacity)).sum();
        let total_registered: u64 = details.iter().map(|s| s.registered as u64).sum();

        Ok(GlobalStats {
            total_events: details.len(),
            total_capacity,
            total_registered,
            average_occupancy_percentage: occupancy_percentage(total_registered, total_capacity),
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupancy_percentage() {
        assert_eq!(occupancy_percentage(3, 10), 30.0);
        assert_eq!(occupancy_percentage(1, 3), 33.33);
        assert_eq!(occupancy_percentage(2, 3), 66.67);
        assert_eq!(occupancy_percentage(5, 0), 0.0);
        assert_eq!(occupancy_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_over_capacity_exceeds_hundred() {
        assert_eq!(occupancy_percentage(3, 2), 150.0);
    }
}
