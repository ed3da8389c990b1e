use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use super::RedisConfig;
use super::health::check_health;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Open a [`ConnectionManager`] and verify it with `PING`.
///
/// The manager reconnects on its own after transient failures, so one
/// instance is cloned into every consumer.
pub async fn connect(config: &RedisConfig) -> DatabaseResult<ConnectionManager> {
    info!(database = ?config.database, "Connecting to Redis");

    let client = Client::open(config.connection_url())?;
    let mut manager = ConnectionManager::new(client).await?;

    check_health(&mut manager)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to Redis");
    Ok(manager)
}

/// [`connect`] wrapped in exponential backoff; `None` uses the default policy.
pub async fn connect_from_config_with_retry(
    config: &RedisConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<ConnectionManager> {
    match retry_config {
        Some(policy) => retry_with_backoff(|| connect(config), policy).await,
        None => retry(|| connect(config)).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires actual Redis
    async fn test_connect() {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        assert!(connect(&RedisConfig::new(url)).await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_scheme() {
        let config = RedisConfig::new("http://localhost:6379");
        let result = connect(&config).await;
        assert!(matches!(result, Err(DatabaseError::Redis(_))));
    }
}
