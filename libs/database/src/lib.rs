//! Storage connectors and the cache-aside layer.
//!
//! # Features
//!
//! - `redis` (default) - Redis connection management and health checks
//! - `mongodb` - MongoDB connection management, health checks, error helpers
//! - `cache` - [`cache::CacheClient`] with Redis and in-memory stores
//! - `config` - `core_config::FromEnv` implementations for every config type
//! - `all` - everything above
//!
//! # Examples
//!
//! ## MongoDB
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "attendance");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```
//!
//! ## Cache-aside
//!
//! ```ignore
//! use database::cache::{CacheClient, KeySpace};
//!
//! const EVENTS: KeySpace = KeySpace::new("event", "events");
//!
//! let cache = CacheClient::in_memory(std::time::Duration::from_secs(600));
//! let events = cache
//!     .get_or_load(&EVENTS.all(), || async { repository.list().await })
//!     .await?;
//! cache.invalidate(&[EVENTS.all(), EVENTS.entity(id)]).await;
//! ```

pub mod common;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "mongodb")]
pub mod mongodb;

#[cfg(feature = "cache")]
pub mod cache;

pub use common::{DatabaseError, DatabaseResult};
