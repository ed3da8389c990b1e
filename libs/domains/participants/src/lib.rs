//! Participants Domain
//!
//! People who attend events. Emails are unique across the directory; the
//! attendance domain resolves participants through
//! `Arc<dyn ParticipantRepository>`.

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ParticipantError, ParticipantResult};
pub use handlers::{ApiDoc, router};
pub use memory::InMemoryParticipantRepository;
pub use models::{CreateParticipant, Participant, UpdateParticipant};
pub use self::mongodb::MongoParticipantRepository;
pub use repository::ParticipantRepository;
pub use service::{PARTICIPANTS, ParticipantService};
