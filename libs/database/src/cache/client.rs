use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use super::keys::key_space_label;
use super::{CacheBackend, CacheConfig, CacheStore, MemoryCacheStore, RedisCacheStore};
use crate::common::{DatabaseError, DatabaseResult};
use crate::redis::{RedisConfig, connect_from_config_with_retry};

/// JSON cache-aside client shared by every service.
///
/// Cloning is cheap; all clones share one store.
#[derive(Clone)]
pub struct CacheClient {
    store: Arc<dyn CacheStore>,
    default_ttl: Duration,
}

impl std::fmt::Debug for CacheClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheClient")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl CacheClient {
    pub fn new(store: Arc<dyn CacheStore>, default_ttl: Duration) -> Self {
        Self { store, default_ttl }
    }

    pub fn in_memory(default_ttl: Duration) -> Self {
        Self::new(Arc::new(MemoryCacheStore::new()), default_ttl)
    }

    /// Build the configured backend. Redis connects with retry and requires
    /// `redis`.
    pub async fn connect(
        config: &CacheConfig,
        redis: Option<&RedisConfig>,
    ) -> DatabaseResult<Self> {
        match config.backend {
            CacheBackend::Memory => {
                info!(ttl_secs = config.ttl_secs, "Using in-memory cache");
                Ok(Self::in_memory(config.ttl()))
            }
            CacheBackend::Redis => {
                let redis = redis.ok_or_else(|| {
                    DatabaseError::ConfigError(
                        "REDIS_URL is required when CACHE_BACKEND=redis".to_string(),
                    )
                })?;
                let conn = connect_from_config_with_retry(redis, None).await?;
                info!(ttl_secs = config.ttl_secs, "Using Redis cache");
                Ok(Self::new(Arc::new(RedisCacheStore::new(conn)), config.ttl()))
            }
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Cached value for `key`. Store and decode failures count as a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, unavailable = e.is_unavailable(), error = %e, "Cache read failed");
                None
            }
        };

        let value = raw.and_then(|raw| match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cache entry");
                None
            }
        });

        let key_space = key_space_label(key);
        if value.is_some() {
            debug!(key, "Cache hit");
            counter!("cache_hits_total", "key_space" => key_space).increment(1);
        } else {
            debug!(key, "Cache miss");
            counter!("cache_misses_total", "key_space" => key_space).increment(1);
        }
        value
    }

    /// Store `value` under `key` with the default TTL. Failures are logged.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Cache payload could not be encoded");
                return;
            }
        };

        if let Err(e) = self.store.set(key, raw, self.default_ttl).await {
            warn!(key, unavailable = e.is_unavailable(), error = %e, "Cache write failed");
        }
    }

    /// Read-through: return the cached value, or run `loader` and cache what
    /// it returns. Loader errors propagate and leave the cache untouched.
    pub async fn get_or_load<T, E, F, Fut>(&self, key: &str, loader: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.get_json(key).await {
            return Ok(cached);
        }

        let value = loader().await?;
        self.set_json(key, &value).await;
        Ok(value)
    }

    /// Delete every key. Never fails the caller.
    pub async fn invalidate(&self, keys: &[String]) {
        for key in keys {
            match self.store.delete(key).await {
                Ok(()) => debug!(key = %key, "Cache entry invalidated"),
                Err(e) => {
                    error!(key = %key, error = %e, "Cache invalidation failed");
                    counter!("cache_invalidation_failures_total").increment(1);
                }
            }
        }
    }

    pub async fn ping(&self) -> DatabaseResult<()> {
        self.store.ping().await
    }

    pub async fn close(&self) {
        self.store.close().await;
        info!("Cache closed");
    }
}
