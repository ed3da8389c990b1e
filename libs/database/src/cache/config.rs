use std::time::Duration;

use strum::{Display, EnumString};

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// Where cache entries live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CacheBackend {
    /// Shared Redis instance
    #[default]
    Redis,
    /// Process-local map, for development and tests
    Memory,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub const DEFAULT_TTL_SECS: u64 = 600;

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            ttl_secs: Self::DEFAULT_TTL_SECS,
        }
    }
}

/// Environment variables:
/// - `CACHE_BACKEND`: `redis` (default) or `memory`
/// - `CACHE_TTL_SECS`: entry lifetime, default 600
#[cfg(feature = "config")]
impl FromEnv for CacheConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("CACHE_BACKEND", "redis");
        let backend = raw.trim().parse().map_err(|_| ConfigError::ParseError {
            key: "CACHE_BACKEND".to_string(),
            details: format!("unknown backend '{}', expected redis or memory", raw),
        })?;

        Ok(Self {
            backend,
            ttl_secs: env_parse_or("CACHE_TTL_SECS", Self::DEFAULT_TTL_SECS)?,
        })
    }
}
