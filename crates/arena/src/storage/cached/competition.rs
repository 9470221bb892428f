//! Cached competition repository decorator.
//!
//! Wraps a `CompetitionRepository` implementation with the cache-aside pattern.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use arena_core::cache::{
    competition_key, deserialize_competition, deserialize_competitions, serialize_competition,
    serialize_competitions, Cache, Mutation, COMPETITIONS_ALL_KEY,
};
use arena_core::competition::{Competition, CompetitionDraft};
use arena_core::storage::{CompetitionRepository, Result};

use super::support::{invalidate, lookup, populate};

/// Cached competition repository decorator.
///
/// - **Reads**: Check cache first, on miss fetch from repository and populate cache
/// - **Writes**: Persist to repository, then invalidate every affected key
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedCompetitionRepository<R, C>
where
    R: CompetitionRepository,
    C: Cache + ?Sized,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedCompetitionRepository<R, C>
where
    R: CompetitionRepository,
    C: Cache + ?Sized,
{
    /// Creates a new cached competition repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for every entry this decorator writes
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }
}

#[async_trait]
impl<R, C> CompetitionRepository for CachedCompetitionRepository<R, C>
where
    R: CompetitionRepository + 'static,
    C: Cache + ?Sized + 'static,
{
    async fn list_competitions(&self) -> Result<Vec<Competition>> {
        if let Some(competitions) =
            lookup(&*self.cache, COMPETITIONS_ALL_KEY, deserialize_competitions).await
        {
            return Ok(competitions);
        }

        let competitions = self.repository.list_competitions().await?;
        populate(
            &*self.cache,
            COMPETITIONS_ALL_KEY,
            serialize_competitions(&competitions),
            self.ttl,
        )
        .await;

        Ok(competitions)
    }

    async fn get_competition(&self, id: i64) -> Result<Competition> {
        let cache_key = competition_key(id);

        if let Some(competition) = lookup(&*self.cache, &cache_key, deserialize_competition).await
        {
            return Ok(competition);
        }

        let competition = self.repository.get_competition(id).await?;
        populate(
            &*self.cache,
            &cache_key,
            serialize_competition(&competition),
            self.ttl,
        )
        .await;

        Ok(competition)
    }

    async fn create_competition(&self, draft: &CompetitionDraft) -> Result<Competition> {
        let competition = self.repository.create_competition(draft).await?;

        invalidate(&*self.cache, Mutation::CompetitionCreated).await;
        populate(
            &*self.cache,
            &competition_key(competition.id),
            serialize_competition(&competition),
            self.ttl,
        )
        .await;

        tracing::info!(competition_id = competition.id, name = %competition.name, "Competition created");
        Ok(competition)
    }

    async fn update_competition(&self, id: i64, draft: &CompetitionDraft) -> Result<Competition> {
        let competition = self.repository.update_competition(id, draft).await?;

        invalidate(&*self.cache, Mutation::CompetitionUpdated { id }).await;

        tracing::info!(competition_id = id, "Competition updated");
        Ok(competition)
    }

    async fn delete_competition(&self, id: i64) -> Result<()> {
        self.repository.delete_competition(id).await?;

        invalidate(&*self.cache, Mutation::CompetitionDeleted { id }).await;

        tracing::info!(competition_id = id, "Competition deleted");
        Ok(())
    }

    async fn competition_exists(&self, id: i64) -> Result<bool> {
        self.repository.competition_exists(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{NaiveDate, TimeZone, Utc};
    use tokio::sync::RwLock;

    use arena_core::cache::competition_participants_key;
    use arena_core::storage::RepositoryError;

    use crate::config::Config;
    use crate::storage::cached::support::mocks::MockCache;

    // Mock repository that counts store round-trips
    struct MockCompetitionRepository {
        competitions: RwLock<HashMap<i64, Competition>>,
        next_id: AtomicUsize,
        list_calls: AtomicUsize,
        get_calls: AtomicUsize,
    }

    impl MockCompetitionRepository {
        fn new() -> Self {
            Self {
                competitions: RwLock::new(HashMap::new()),
                next_id: AtomicUsize::new(1),
                list_calls: AtomicUsize::new(0),
                get_calls: AtomicUsize::new(0),
            }
        }

        fn materialize(id: i64, draft: &CompetitionDraft) -> Competition {
            let now = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
            Competition {
                id,
                name: draft.name.clone(),
                description: draft.description.clone(),
                date: draft.date,
                location: draft.location.clone(),
                created_at: now,
                updated_at: now,
            }
        }
    }

    #[async_trait]
    impl CompetitionRepository for MockCompetitionRepository {
        async fn list_competitions(&self) -> Result<Vec<Competition>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let mut all: Vec<_> = self.competitions.read().await.values().cloned().collect();
            all.sort_by_key(|c| (c.date, c.id));
            Ok(all)
        }

        async fn get_competition(&self, id: i64) -> Result<Competition> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.competitions
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| RepositoryError::not_found("Competition", id))
        }

        async fn create_competition(&self, draft: &CompetitionDraft) -> Result<Competition> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
            let competition = Self::materialize(id, draft);
            self.competitions
                .write()
                .await
                .insert(id, competition.clone());
            Ok(competition)
        }

        async fn update_competition(
            &self,
            id: i64,
            draft: &CompetitionDraft,
        ) -> Result<Competition> {
            let mut competitions = self.competitions.write().await;
            if !competitions.contains_key(&id) {
                return Err(RepositoryError::not_found("Competition", id));
            }
            let competition = Self::materialize(id, draft);
            competitions.insert(id, competition.clone());
            Ok(competition)
        }

        async fn delete_competition(&self, id: i64) -> Result<()> {
            self.competitions
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::not_found("Competition", id))
        }

        async fn competition_exists(&self, id: i64) -> Result<bool> {
            Ok(self.competitions.read().await.contains_key(&id))
        }
    }

    fn spring_open() -> CompetitionDraft {
        CompetitionDraft::new("Spring Open", NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), "Hall A")
    }

    fn setup(
        cache: MockCache,
    ) -> (
        Arc<MockCompetitionRepository>,
        Arc<MockCache>,
        CachedCompetitionRepository<MockCompetitionRepository, MockCache>,
    ) {
        let repo = Arc::new(MockCompetitionRepository::new());
        let cache = Arc::new(cache);
        let ttl = Config::from_lookup(|_| None).cache_ttl();
        let cached = CachedCompetitionRepository::new(repo.clone(), cache.clone(), ttl);
        (repo, cache, cached)
    }

    #[tokio::test]
    async fn test_get_competition_populates_then_hits_cache() {
        let (repo, cache, cached) = setup(MockCache::new());
        let created = repo.create_competition(&spring_open()).await.unwrap();

        let first = cached.get_competition(created.id).await.unwrap();
        assert_eq!(repo.get_calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains(&competition_key(created.id)).await);

        let second = cached.get_competition(created.id).await.unwrap();
        assert_eq!(repo.get_calls.load(Ordering::SeqCst), 1); // Still 1
        assert_eq!(first, second);
        assert_eq!(first, created);
    }

    #[tokio::test]
    async fn test_list_competitions_hits_cache_on_second_call() {
        let (repo, cache, cached) = setup(MockCache::new());
        repo.create_competition(&spring_open()).await.unwrap();

        cached.list_competitions().await.unwrap();
        let second = cached.list_competitions().await.unwrap();

        assert_eq!(repo.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.len(), 1);
        assert!(cache.contains(COMPETITIONS_ALL_KEY).await);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let (repo, cache, cached) = setup(MockCache::new());

        let result = cached.get_competition(9).await;

        assert_eq!(result, Err(RepositoryError::not_found("Competition", 9)));
        assert_eq!(repo.get_calls.load(Ordering::SeqCst), 1);
        assert!(cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_payload_falls_through_to_store() {
        let (repo, cache, cached) = setup(MockCache::new());
        let created = repo.create_competition(&spring_open()).await.unwrap();
        cache
            .seed(&competition_key(created.id), b"{not json")
            .await;

        let result = cached.get_competition(created.id).await.unwrap();

        assert_eq!(result, created);
        assert_eq!(repo.get_calls.load(Ordering::SeqCst), 1);
        // Repopulated with a valid payload.
        let bytes = cache.store.read().await[&competition_key(created.id)].clone();
        assert_eq!(deserialize_competition(&bytes).unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_invalidates_list_and_caches_item() {
        let (_repo, cache, cached) = setup(MockCache::new());
        cache.seed(COMPETITIONS_ALL_KEY, b"[]").await;

        let created = cached.create_competition(&spring_open()).await.unwrap();

        assert!(!cache.contains(COMPETITIONS_ALL_KEY).await);
        assert!(cache.contains(&competition_key(created.id)).await);
    }

    #[tokio::test]
    async fn test_entries_expire_after_five_minutes() {
        let (repo, cache, cached) = setup(MockCache::new());
        let stored = repo.create_competition(&spring_open()).await.unwrap();
        let five_minutes = Some(Some(Duration::from_secs(300)));

        cached.get_competition(stored.id).await.unwrap();
        cached.list_competitions().await.unwrap();
        let created = cached.create_competition(&spring_open()).await.unwrap();

        assert_eq!(cache.ttl_of(&competition_key(stored.id)).await, five_minutes);
        assert_eq!(cache.ttl_of(COMPETITIONS_ALL_KEY).await, five_minutes);
        assert_eq!(cache.ttl_of(&competition_key(created.id)).await, five_minutes);
    }

    #[tokio::test]
    async fn test_update_invalidates_list_and_item() {
        let (repo, cache, cached) = setup(MockCache::new());
        let created = repo.create_competition(&spring_open()).await.unwrap();
        cached.list_competitions().await.unwrap();
        cached.get_competition(created.id).await.unwrap();

        let draft = CompetitionDraft::new(
            "Spring Final",
            NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            "Hall B",
        );
        cached.update_competition(created.id, &draft).await.unwrap();

        assert!(!cache.contains(COMPETITIONS_ALL_KEY).await);
        assert!(!cache.contains(&competition_key(created.id)).await);
        assert_eq!(
            cached.get_competition(created.id).await.unwrap().name,
            "Spring Final"
        );
    }

    #[tokio::test]
    async fn test_delete_invalidates_scoped_participants() {
        let (repo, cache, cached) = setup(MockCache::new());
        let created = repo.create_competition(&spring_open()).await.unwrap();
        cache.seed(COMPETITIONS_ALL_KEY, b"[]").await;
        cache.seed(&competition_key(created.id), b"{}").await;
        cache
            .seed(&competition_participants_key(created.id), b"[]")
            .await;

        cached.delete_competition(created.id).await.unwrap();

        assert!(!cache.contains(COMPETITIONS_ALL_KEY).await);
        assert!(!cache.contains(&competition_key(created.id)).await);
        assert!(
            !cache
                .contains(&competition_participants_key(created.id))
                .await
        );
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_untouched() {
        let (_repo, cache, cached) = setup(MockCache::new());
        cache.seed(COMPETITIONS_ALL_KEY, b"[]").await;

        let result = cached.delete_competition(404).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert!(cache.contains(COMPETITIONS_ALL_KEY).await);
    }

    #[tokio::test]
    async fn test_cache_outage_does_not_fail_operations() {
        let (repo, _cache, cached) = setup(MockCache::failing());

        let created = cached.create_competition(&spring_open()).await.unwrap();
        let fetched = cached.get_competition(created.id).await.unwrap();
        cached.delete_competition(created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(repo.get_calls.load(Ordering::SeqCst), 1);
    }
}
