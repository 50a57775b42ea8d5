//! [`CacheProvider`] on top of Redis.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::debug;

use manara_core::error::{AppError, ErrorKind};
use manara_core::result::AppResult;
use manara_core::traits::cache::CacheProvider;

use super::client::RedisClient;

/// Keys fetched per `SCAN` round-trip.
const SCAN_BATCH: usize = 200;

/// Undo slots stored as `SET key value EX ttl` strings.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
    default_ttl: Duration,
}

impl RedisCacheProvider {
    pub fn new(client: RedisClient, default_ttl_seconds: u64) -> Self {
        Self {
            client,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    fn keyed(&self, key: &str) -> (String, ConnectionManager) {
        (self.client.prefixed_key(key), self.client.conn_mut())
    }
}

fn redis_err(e: redis::RedisError) -> AppError {
    AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let (key, mut conn) = self.keyed(key);
        conn.get(&key).await.map_err(redis_err)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let (key, mut conn) = self.keyed(key);
        // SET EX rejects 0; sub-second TTLs round up.
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(&key, value, seconds)
            .await
            .map_err(redis_err)
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let (key, mut conn) = self.keyed(key);
        conn.del::<_, ()>(&key).await.map_err(redis_err)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let (key, mut conn) = self.keyed(key);
        conn.exists(&key).await.map_err(redis_err)
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        let (pattern, mut conn) = self.keyed(pattern);

        let mut cursor: u64 = 0;
        let mut removed = 0u64;
        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(redis_err)?;

            if !keys.is_empty() {
                removed += conn.del::<_, u64>(&keys).await.map_err(redis_err)?;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!(%pattern, removed, "Deleted matching keys");
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(redis_err)?;
        Ok(pong == "PONG")
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
