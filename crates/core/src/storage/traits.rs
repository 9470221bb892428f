use async_trait::async_trait;
use chrono::NaiveDate;

use crate::competition::{
    Competition, CompetitionDraft, Participant, ParticipantDraft, Registration,
};

use super::Result;

/// Repository for competition operations.
#[async_trait]
pub trait CompetitionRepository: Send + Sync {
    /// Lists all competitions ordered by date ascending.
    async fn list_competitions(&self) -> Result<Vec<Competition>>;

    /// Gets a competition by its ID, failing with `NotFound` if absent.
    async fn get_competition(&self, id: i64) -> Result<Competition>;

    /// Creates a competition. The store assigns its ID and timestamps.
    async fn create_competition(&self, draft: &CompetitionDraft) -> Result<Competition>;

    /// Replaces every field of an existing competition.
    async fn update_competition(&self, id: i64, draft: &CompetitionDraft) -> Result<Competition>;

    /// Deletes a competition and, with it, its registrations.
    async fn delete_competition(&self, id: i64) -> Result<()>;

    /// Returns whether a competition with this ID currently exists.
    async fn competition_exists(&self, id: i64) -> Result<bool>;
}

/// Repository for participants and their competition registrations.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Lists all participants, newest first.
    async fn list_participants(&self) -> Result<Vec<Participant>>;

    /// Lists the participants registered in a competition, latest registration first.
    async fn list_participants_by_competition(
        &self,
        competition_id: i64,
    ) -> Result<Vec<Participant>>;

    /// Gets a participant by its ID, failing with `NotFound` if absent.
    async fn get_participant(&self, id: i64) -> Result<Participant>;

    /// Lists the competitions a participant is registered in, by date ascending.
    async fn get_participant_competitions(&self, participant_id: i64)
        -> Result<Vec<Competition>>;

    /// Creates a participant, failing with `Conflict` if the email is taken.
    async fn create_participant(&self, draft: &ParticipantDraft) -> Result<Participant>;

    /// Replaces every field of an existing participant.
    ///
    /// Fails with `Conflict` if the email belongs to another participant.
    async fn update_participant(&self, id: i64, draft: &ParticipantDraft) -> Result<Participant>;

    /// Deletes a participant and its registrations.
    async fn delete_participant(&self, id: i64) -> Result<()>;

    /// Registers a participant in a competition.
    ///
    /// Fails with `InvalidReference` if either side does not exist and with
    /// `Conflict` if the pair is already registered.
    async fn add_registration(
        &self,
        participant_id: i64,
        competition_id: i64,
        registration_date: NaiveDate,
    ) -> Result<Registration>;

    /// Removes a registration, failing with `NotFound` if the pair is not registered.
    async fn remove_registration(&self, participant_id: i64, competition_id: i64) -> Result<()>;
}

/// Reachability probe for the persistent store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<()>;
}
