//! Redis cache implementation.
//!
//! The connection is opened lazily: a server that is down at startup only
//! degrades the service to store-only reads until it comes back.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::RwLock;

use arena_core::cache::{Cache, CacheError, Result};

use super::error::map_redis_error;

/// Upper bound for establishing a connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// How long operations fail fast after a failed connection attempt.
const RECONNECT_BACKOFF: Duration = Duration::from_secs(5);

/// Redis cache backend using a connection manager.
///
/// The manager reconnects on its own once established. Until then a failed
/// attempt makes every operation fail immediately for `RECONNECT_BACKOFF`,
/// after which the next operation tries again. No lock is held while
/// connecting, so concurrent callers never queue behind a slow attempt.
pub struct RedisCache {
    client: redis::Client,
    conn: RwLock<Option<ConnectionManager>>,
    last_failure: RwLock<Option<Instant>>,
}

impl RedisCache {
    /// Creates a Redis cache for `url` without connecting.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the URL cannot be parsed.
    pub fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        Ok(Self {
            client,
            conn: RwLock::new(None),
            last_failure: RwLock::new(None),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        if let Some(conn) = self.conn.read().await.as_ref() {
            return Ok(conn.clone());
        }

        if let Some(failed_at) = *self.last_failure.read().await {
            if failed_at.elapsed() < RECONNECT_BACKOFF {
                return Err(CacheError::ConnectionFailed(
                    "waiting before reconnecting".to_string(),
                ));
            }
        }

        let attempt =
            tokio::time::timeout(CONNECT_TIMEOUT, ConnectionManager::new(self.client.clone()))
                .await
                .map_err(|_| CacheError::ConnectionFailed("connection timed out".to_string()))
                .and_then(|result| result.map_err(map_redis_error));

        match attempt {
            Ok(conn) => {
                *self.last_failure.write().await = None;
                let mut slot = self.conn.write().await;
                // Another caller may have connected first; keep its manager.
                let conn = slot.get_or_insert(conn).clone();
                tracing::info!("Connected to Redis");
                Ok(conn)
            }
            Err(err) => {
                *self.last_failure.write().await = Some(Instant::now());
                tracing::debug!(error = %err, "Redis connection attempt failed");
                Err(err)
            }
        }
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection().await?;

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}
