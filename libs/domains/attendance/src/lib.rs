//! Attendance Domain
//!
//! Per-event attendance rosters with a hard capacity and no duplicate
//! attendees, plus occupancy statistics.
//!
//! ```text
//! POST /attendance
//!   │ parse attended_at
//!   ├─► EventRepository::get_by_id        (404 event)
//!   ├─► ParticipantRepository::get_by_id  (404 participant)
//!   ├─► EventLocks::lock(event_id)
//!   │     ├─ duplicate?  ─► 409
//!   │     ├─ full?       ─► 409
//!   │     └─ create roster or conditional append
//!   └─► invalidate rosters_all, roster_{id}
//! ```

pub mod error;
pub mod handlers;
pub mod locks;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod stats;

pub use error::{AttendanceError, AttendanceResult};
pub use handlers::{ApiDoc, StatsApiDoc, router, stats_router};
pub use locks::EventLocks;
pub use memory::InMemoryRosterRepository;
pub use models::{
    AppendOutcome, Attendance, AttendanceRoster, AttendeeDetails, EventStats, GlobalStats,
    RegisterAttendance, Registration, RosterDetails, UpdateRoster, parse_attended_at,
};
pub use self::mongodb::MongoRosterRepository;
pub use repository::RosterRepository;
pub use service::{AttendanceService, ROSTERS};
pub use stats::occupancy_percentage;
