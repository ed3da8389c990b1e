//! Events Domain
//!
//! The event directory: named events with a calendar date and a seat
//! capacity.
//!
//! ```text
//! handlers ──► EventService ──► CacheClient (events_all, event_{id})
//!                   │
//!                   └─────────► EventRepository ──► MongoDB "events"
//! ```
//!
//! Other domains read events through `Arc<dyn EventRepository>`, bypassing
//! the cache.

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{EventError, Result};
pub use handlers::{ApiDoc, router};
pub use memory::InMemoryEventRepository;
pub use models::{CreateEvent, Event, EventDate, UpdateEvent};
pub use self::mongodb::MongoEventRepository;
pub use repository::EventRepository;
pub use service::{EVENTS, EventService};
