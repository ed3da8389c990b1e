use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;

use super::CacheStore;
use crate::common::DatabaseResult;
use crate::redis::check_health;

/// [`CacheStore`] over a shared Redis [`ConnectionManager`].
#[derive(Clone)]
pub struct RedisCacheStore {
    conn: ConnectionManager,
}

impl RedisCacheStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> DatabaseResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> DatabaseResult<()> {
        let mut conn = self.conn.clone();
        // EX 0 is rejected by the server
        let secs = ttl.as_secs().max(1);
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(secs)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> DatabaseResult<()> {
        let mut conn = self.conn.clone();
        let _: i64 = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(())
    }

    async fn ping(&self) -> DatabaseResult<()> {
        let mut conn = self.conn.clone();
        check_health(&mut conn).await
    }
}
