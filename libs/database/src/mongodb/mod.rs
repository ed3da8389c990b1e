//! MongoDB connection management and helpers

mod config;
mod connector;
mod errors;
mod health;
mod ids;

pub use config::MongoConfig;
pub use connector::{MongoError, connect_from_config, connect_from_config_with_retry};
pub use errors::{DUPLICATE_KEY_CODE, is_duplicate_key_error};
pub use health::ping;
pub use ids::uuid_bson;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
