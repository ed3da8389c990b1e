//! Cache-aside layer
//!
//! Services read through [`CacheClient::get_or_load`] and call
//! [`CacheClient::invalidate`] after every durable write. Entries are JSON
//! strings with a TTL; the durable store stays authoritative, so every store
//! failure degrades to a miss instead of failing the request.

mod client;
mod config;
mod keys;
mod redis_store;
mod store;

pub use client::CacheClient;
pub use config::{CacheBackend, CacheConfig};
pub use keys::KeySpace;
pub use redis_store::RedisCacheStore;
pub use store::{CacheStore, MemoryCacheStore};
