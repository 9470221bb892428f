//! Cached participant repository decorator.
//!
//! Wraps a `ParticipantRepository` implementation with the cache-aside pattern.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use arena_core::cache::{
    competition_participants_key, deserialize_participant, deserialize_participants,
    participant_key, serialize_participant, serialize_participants, Cache, Mutation,
    PARTICIPANTS_ALL_KEY,
};
use arena_core::competition::{Competition, Participant, ParticipantDraft, Registration};
use arena_core::storage::{ParticipantRepository, Result};

use super::support::{invalidate, lookup, populate};

/// Cached participant repository decorator.
///
/// A participant's competitions are always read from the store: no write
/// path invalidates a per-participant list, so caching it would serve
/// registrations that no longer exist.
pub struct CachedParticipantRepository<R, C>
where
    R: ParticipantRepository,
    C: Cache + ?Sized,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedParticipantRepository<R, C>
where
    R: ParticipantRepository,
    C: Cache + ?Sized,
{
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    async fn cached_list<F>(&self, key: &str, fetch: F) -> Result<Vec<Participant>>
    where
        F: std::future::Future<Output = Result<Vec<Participant>>> + Send,
    {
        if let Some(participants) = lookup(&*self.cache, key, deserialize_participants).await {
            return Ok(participants);
        }

        let participants = fetch.await?;
        populate(
            &*self.cache,
            key,
            serialize_participants(&participants),
            self.ttl,
        )
        .await;

        Ok(participants)
    }
}

#[async_trait]
impl<R, C> ParticipantRepository for CachedParticipantRepository<R, C>
where
    R: ParticipantRepository + 'static,
    C: Cache + ?Sized + 'static,
{
    async fn list_participants(&self) -> Result<Vec<Participant>> {
        self.cached_list(PARTICIPANTS_ALL_KEY, self.repository.list_participants())
            .await
    }

    async fn list_participants_by_competition(
        &self,
        competition_id: i64,
    ) -> Result<Vec<Participant>> {
        let cache_key = competition_participants_key(competition_id);
        self.cached_list(
            &cache_key,
            self.repository
                .list_participants_by_competition(competition_id),
        )
        .await
    }

    async fn get_participant(&self, id: i64) -> Result<Participant> {
        let cache_key = participant_key(id);

        if let Some(participant) = lookup(&*self.cache, &cache_key, deserialize_participant).await
        {
            return Ok(participant);
        }

        let participant = self.repository.get_participant(id).await?;
        populate(
            &*self.cache,
            &cache_key,
            serialize_participant(&participant),
            self.ttl,
        )
        .await;

        Ok(participant)
    }

    async fn get_participant_competitions(
        &self,
        participant_id: i64,
    ) -> Result<Vec<Competition>> {
        self.repository
            .get_participant_competitions(participant_id)
            .await
    }

    async fn create_participant(&self, draft: &ParticipantDraft) -> Result<Participant> {
        let participant = self.repository.create_participant(draft).await?;

        invalidate(&*self.cache, Mutation::ParticipantCreated).await;
        populate(
            &*self.cache,
            &participant_key(participant.id),
            serialize_participant(&participant),
            self.ttl,
        )
        .await;

        tracing::info!(participant_id = participant.id, "Participant created");
        Ok(participant)
    }

    async fn update_participant(&self, id: i64, draft: &ParticipantDraft) -> Result<Participant> {
        let participant = self.repository.update_participant(id, draft).await?;

        invalidate(&*self.cache, Mutation::ParticipantUpdated { id }).await;

        tracing::info!(participant_id = id, "Participant updated");
        Ok(participant)
    }

    async fn delete_participant(&self, id: i64) -> Result<()> {
        self.repository.delete_participant(id).await?;

        invalidate(&*self.cache, Mutation::ParticipantDeleted { id }).await;

        tracing::info!(participant_id = id, "Participant deleted");
        Ok(())
    }

    async fn add_registration(
        &self,
        participant_id: i64,
        competition_id: i64,
        registration_date: NaiveDate,
    ) -> Result<Registration> {
        let registration = self
            .repository
            .add_registration(participant_id, competition_id, registration_date)
            .await?;

        invalidate(
            &*self.cache,
            Mutation::RegistrationAdded {
                participant_id,
                competition_id,
            },
        )
        .await;

        tracing::info!(participant_id, competition_id, "Participant registered");
        Ok(registration)
    }

    async fn remove_registration(&self, participant_id: i64, competition_id: i64) -> Result<()> {
        self.repository
            .remove_registration(participant_id, competition_id)
            .await?;

        invalidate(
            &*self.cache,
            Mutation::RegistrationRemoved {
                participant_id,
                competition_id,
            },
        )
        .await;

        tracing::info!(participant_id, competition_id, "Participant unregistered");
        Ok(())
    }
}
