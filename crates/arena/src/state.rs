//! Application state with repository-based storage.
//!
//! Handlers see the repositories only through trait objects. The concrete
//! stack is always SQLite wrapped by the cache-aside decorators; the cache
//! backend is chosen by the `redis` feature.

use std::sync::Arc;
use std::time::Duration;

use arena_core::cache::Cache;
use arena_core::storage::{CompetitionRepository, ParticipantRepository, StoreHealth};

use crate::config::Config;
use crate::storage::{CachedCompetitionRepository, CachedParticipantRepository, SqliteRepository};

/// Shared application state.
///
/// Cloned for each request; every field is a process-wide handle created
/// once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Competition repository (cached, wraps the SQLite store).
    pub competitions: Arc<dyn CompetitionRepository>,
    /// Participant and registration repository (cached, wraps the SQLite store).
    pub participants: Arc<dyn ParticipantRepository>,
    /// Persistent store probe for the health endpoint.
    pub database: Arc<dyn StoreHealth>,
    /// Cache probe for the health endpoint.
    pub cache: Arc<dyn Cache>,
}

impl AppState {
    /// Wires the cached repositories around a store and a cache.
    pub fn build<C>(store: Arc<SqliteRepository>, cache: Arc<C>, ttl: Duration) -> Self
    where
        C: Cache + 'static,
    {
        let competitions = Arc::new(CachedCompetitionRepository::new(
            store.clone(),
            cache.clone(),
            ttl,
        ));
        let participants = Arc::new(CachedParticipantRepository::new(
            store.clone(),
            cache.clone(),
            ttl,
        ));

        Self {
            competitions,
            participants,
            database: store,
            cache,
        }
    }

    /// Opens the configured stores.
    ///
    /// Fails if the database cannot be opened. An unreachable cache only
    /// logs a warning: reads then go straight to the database.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(SqliteRepository::new(&config.database_path).await?);
        tracing::info!(path = %config.database_path, "Opened SQLite database");

        let cache = connect_cache(config).await?;

        Ok(Self::build(store, cache, config.cache_ttl()))
    }

    /// State over an in-memory database and cache, for tests.
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        use std::num::NonZeroUsize;

        use crate::cache::MemoryCache;

        let store = Arc::new(
            SqliteRepository::new_in_memory()
                .await
                .expect("in-memory database should open"),
        );
        let cache = Arc::new(MemoryCache::new(
            NonZeroUsize::new(1_000).expect("non-zero capacity"),
        ));

        Self::build(store, cache, Duration::from_secs(300))
    }
}

#[cfg(not(feature = "redis"))]
async fn connect_cache(config: &Config) -> anyhow::Result<Arc<crate::cache::MemoryCache>> {
    tracing::info!(
        max_entries = config.cache_max_entries.get(),
        ttl_seconds = config.cache_ttl_seconds,
        "Using in-memory cache"
    );
    Ok(Arc::new(crate::cache::MemoryCache::new(
        config.cache_max_entries,
    )))
}

#[cfg(feature = "redis")]
async fn connect_cache(config: &Config) -> anyhow::Result<Arc<crate::cache::RedisCache>> {
    let cache = crate::cache::RedisCache::new(&config.redis_url)?;

    match cache.ping().await {
        Ok(()) => tracing::info!(url = %config.redis_url, "Using Redis cache"),
        Err(err) => tracing::warn!(
            url = %config.redis_url,
            error = %err,
            "Redis unreachable, continuing without cache until it recovers"
        ),
    }

    Ok(Arc::new(cache))
}
