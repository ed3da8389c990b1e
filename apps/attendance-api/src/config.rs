use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::cache::{CacheBackend, CacheConfig};
use database::mongodb::MongoConfig;
use database::redis::RedisConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub cache: CacheConfig,
    /// Present only when the cache backend is Redis
    pub redis: Option<RedisConfig>,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let cache = CacheConfig::from_env()?;
        let redis = match cache.backend {
            CacheBackend::Redis => Some(RedisConfig::from_env()?),
            CacheBackend::Memory => None,
        };
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            cache,
            redis,
            server,
            environment,
        })
    }
}
