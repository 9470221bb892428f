//! SQLite repository implementation.
//!
//! Implements the repository traits from `arena_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_rusqlite::Connection;

use arena_core::competition::{
    Competition, CompetitionDraft, Participant, ParticipantDraft, Registration,
};
use arena_core::storage::{
    CompetitionRepository, ParticipantRepository, RepositoryError, Result, StoreHealth,
};

use super::conversions::{format_date, row_to_competition, row_to_participant, row_to_registration};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Holds one long-lived connection shared by every request. Each method is
/// a single round-trip; the check-then-act sequences span several.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::PRAGMAS).map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs a boolean `SELECT EXISTS(...)` probe.
    async fn exists(&self, sql: &'static str, params: Vec<i64>) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare_cached(sql).map_err(wrap_err)?;
                stmt.query_row(rusqlite::params_from_iter(params), |row| {
                    row.get::<_, bool>(0)
                })
                .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn email_in_use(&self, email: &str, exclude_id: i64) -> Result<bool> {
        let email = email.to_string();

        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::EMAIL_IN_USE,
                    rusqlite::params![email, exclude_id],
                    |row| row.get::<_, bool>(0),
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn query_competitions(
        &self,
        sql: &'static str,
        param: Option<i64>,
    ) -> Result<Vec<Competition>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare_cached(sql).map_err(wrap_err)?;
                let rows = match param {
                    Some(id) => stmt.query_map([id], row_to_competition),
                    None => stmt.query_map([], row_to_competition),
                }
                .map_err(wrap_err)?;

                let mut competitions = Vec::new();
                for row_result in rows {
                    competitions.push(row_result.map_err(wrap_err)?);
                }
                Ok(competitions)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn query_participants(
        &self,
        sql: &'static str,
        param: Option<i64>,
    ) -> Result<Vec<Participant>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare_cached(sql).map_err(wrap_err)?;
                let rows = match param {
                    Some(id) => stmt.query_map([id], row_to_participant),
                    None => stmt.query_map([], row_to_participant),
                }
                .map_err(wrap_err)?;

                let mut participants = Vec::new();
                for row_result in rows {
                    participants.push(row_result.map_err(wrap_err)?);
                }
                Ok(participants)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    /// Executes a DELETE and reports whether any row was removed.
    async fn delete_rows(&self, sql: &'static str, params: Vec<i64>) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(sql, rusqlite::params_from_iter(params))
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

// ============================================================================
// CompetitionRepository implementation
// ============================================================================

#[async_trait]
impl CompetitionRepository for SqliteRepository {
    async fn list_competitions(&self) -> Result<Vec<Competition>> {
        self.query_competitions(schema::SELECT_COMPETITIONS, None)
            .await
    }

    async fn get_competition(&self, id: i64) -> Result<Competition> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare_cached(schema::SELECT_COMPETITION_BY_ID)
                    .map_err(wrap_err)?;
                stmt.query_row([id], row_to_competition).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Competition", id.to_string()))
    }

    async fn create_competition(&self, draft: &CompetitionDraft) -> Result<Competition> {
        let name = draft.name.clone();
        let description = draft.description.clone();
        let date = format_date(&draft.date);
        let location = draft.location.clone();

        let competition = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    schema::INSERT_COMPETITION,
                    rusqlite::params![name, description, date, location],
                    row_to_competition,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        tracing::debug!(competition_id = competition.id, "Created competition");
        Ok(competition)
    }

    async fn update_competition(&self, id: i64, draft: &CompetitionDraft) -> Result<Competition> {
        let name = draft.name.clone();
        let description = draft.description.clone();
        let date = format_date(&draft.date);
        let location = draft.location.clone();

        // RETURNING yields no row when the ID matched nothing.
        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::UPDATE_COMPETITION,
                    rusqlite::params![id, name, description, date, location],
                    row_to_competition,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Competition", id.to_string()))
    }

    async fn delete_competition(&self, id: i64) -> Result<()> {
        if !self.delete_rows(schema::DELETE_COMPETITION, vec![id]).await? {
            return Err(RepositoryError::not_found("Competition", id));
        }

        tracing::debug!(competition_id = id, "Deleted competition");
        Ok(())
    }

    async fn competition_exists(&self, id: i64) -> Result<bool> {
        self.exists(schema::COMPETITION_EXISTS, vec![id]).await
    }
}

// ============================================================================
// ParticipantRepository implementation
// ============================================================================

#[async_trait]
impl ParticipantRepository for SqliteRepository {
    async fn list_participants(&self) -> Result<Vec<Participant>> {
        self.query_participants(schema::SELECT_PARTICIPANTS, None)
            .await
    }

    async fn list_participants_by_competition(
        &self,
        competition_id: i64,
    ) -> Result<Vec<Participant>> {
        self.query_participants(
            schema::SELECT_PARTICIPANTS_BY_COMPETITION,
            Some(competition_id),
        )
        .await
    }

    async fn get_participant(&self, id: i64) -> Result<Participant> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare_cached(schema::SELECT_PARTICIPANT_BY_ID)
                    .map_err(wrap_err)?;
                stmt.query_row([id], row_to_participant).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Participant", id.to_string()))
    }

    async fn get_participant_competitions(
        &self,
        participant_id: i64,
    ) -> Result<Vec<Competition>> {
        self.query_competitions(
            schema::SELECT_COMPETITIONS_FOR_PARTICIPANT,
            Some(participant_id),
        )
        .await
    }

    async fn create_participant(&self, draft: &ParticipantDraft) -> Result<Participant> {
        if self.email_in_use(&draft.email, 0).await? {
            return Err(RepositoryError::email_in_use());
        }

        let name = draft.name.clone();
        let email = draft.email.clone();

        // The UNIQUE constraint settles races the probe above cannot see.
        let participant = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    schema::INSERT_PARTICIPANT,
                    rusqlite::params![name, email],
                    row_to_participant,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Participant", draft.email.clone()))?;

        tracing::debug!(participant_id = participant.id, "Created participant");
        Ok(participant)
    }

    async fn update_participant(&self, id: i64, draft: &ParticipantDraft) -> Result<Participant> {
        if self.email_in_use(&draft.email, id).await? {
            return Err(RepositoryError::email_in_use());
        }

        let name = draft.name.clone();
        let email = draft.email.clone();

        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::UPDATE_PARTICIPANT,
                    rusqlite::params![id, name, email],
                    row_to_participant,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Participant", id.to_string()))
    }

    async fn delete_participant(&self, id: i64) -> Result<()> {
        if !self.delete_rows(schema::DELETE_PARTICIPANT, vec![id]).await? {
            return Err(RepositoryError::not_found("Participant", id));
        }

        tracing::debug!(participant_id = id, "Deleted participant");
        Ok(())
    }

    async fn add_registration(
        &self,
        participant_id: i64,
        competition_id: i64,
        registration_date: NaiveDate,
    ) -> Result<Registration> {
        if !self.competition_exists(competition_id).await? {
            return Err(RepositoryError::invalid_reference(
                "Competition",
                competition_id,
            ));
        }
        if !self
            .exists(schema::PARTICIPANT_EXISTS, vec![participant_id])
            .await?
        {
            return Err(RepositoryError::invalid_reference(
                "Participant",
                participant_id,
            ));
        }
        if self
            .exists(
                schema::REGISTRATION_EXISTS,
                vec![competition_id, participant_id],
            )
            .await?
        {
            return Err(RepositoryError::already_registered());
        }

        let date = format_date(&registration_date);

        let registration = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    schema::INSERT_REGISTRATION,
                    rusqlite::params![competition_id, participant_id, date],
                    row_to_registration,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| {
                map_tokio_rusqlite_error_with_id(e, "Registration", competition_id.to_string())
            })?;

        tracing::debug!(participant_id, competition_id, "Added registration");
        Ok(registration)
    }

    async fn remove_registration(&self, participant_id: i64, competition_id: i64) -> Result<()> {
        let removed = self
            .delete_rows(
                schema::DELETE_REGISTRATION,
                vec![competition_id, participant_id],
            )
            .await?;

        if !removed {
            return Err(RepositoryError::not_found(
                "Registration",
                format!("participant {participant_id} in competition {competition_id}"),
            ));
        }

        tracing::debug!(participant_id, competition_id, "Removed registration");
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for SqliteRepository {
    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn competition_draft(name: &str, on: NaiveDate) -> CompetitionDraft {
        CompetitionDraft::new(name, on, "Hall A")
    }

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_competition() {
        let repo = repo().await;
        let draft = competition_draft("Spring Open", date(2025, 4, 1)).with_description("Indoor");

        let created = repo.create_competition(&draft).await.unwrap();
        let fetched = repo.get_competition(created.id).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created, fetched);
        assert_eq!(fetched.description, "Indoor");
        assert_eq!(fetched.location, "Hall A");
    }

    #[tokio::test]
    async fn test_get_missing_competition_is_not_found() {
        let repo = repo().await;

        let result = repo.get_competition(42).await;

        assert_eq!(result, Err(RepositoryError::not_found("Competition", 42)));
    }

    #[tokio::test]
    async fn test_list_competitions_orders_by_date() {
        let repo = repo().await;
        repo.create_competition(&competition_draft("Summer", date(2025, 7, 1)))
            .await
            .unwrap();
        repo.create_competition(&competition_draft("Spring", date(2025, 4, 1)))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .list_competitions()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["Spring", "Summer"]);
    }

    #[tokio::test]
    async fn test_update_competition_replaces_fields() {
        let repo = repo().await;
        let created = repo
            .create_competition(&competition_draft("Spring", date(2025, 4, 1)))
            .await
            .unwrap();

        let updated = repo
            .update_competition(
                created.id,
                &CompetitionDraft::new("Spring Final", date(2025, 4, 2), "Hall B"),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Spring Final");
        assert_eq!(updated.location, "Hall B");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_competition_is_not_found() {
        let repo = repo().await;

        let result = repo
            .update_competition(5, &competition_draft("Ghost", date(2025, 1, 1)))
            .await;

        assert_eq!(result, Err(RepositoryError::not_found("Competition", 5)));
    }

    #[tokio::test]
    async fn test_delete_competition() {
        let repo = repo().await;
        let created = repo
            .create_competition(&competition_draft("Spring", date(2025, 4, 1)))
            .await
            .unwrap();

        repo.delete_competition(created.id).await.unwrap();

        assert!(!repo.competition_exists(created.id).await.unwrap());
        assert_eq!(
            repo.delete_competition(created.id).await,
            Err(RepositoryError::not_found("Competition", created.id))
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = repo().await;
        repo.create_participant(&ParticipantDraft::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        let duplicate = repo
            .create_participant(&ParticipantDraft::new("Ada L.", "ada@example.com"))
            .await;
        let other = repo
            .create_participant(&ParticipantDraft::new("Grace", "grace@example.com"))
            .await;

        assert_eq!(duplicate, Err(RepositoryError::email_in_use()));
        assert!(other.is_ok());
        assert_eq!(repo.list_participants().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_participant_email_collision() {
        let repo = repo().await;
        let ada = repo
            .create_participant(&ParticipantDraft::new("Ada", "ada@example.com"))
            .await
            .unwrap();
        let grace = repo
            .create_participant(&ParticipantDraft::new("Grace", "grace@example.com"))
            .await
            .unwrap();

        let collision = repo
            .update_participant(grace.id, &ParticipantDraft::new("Grace", "ada@example.com"))
            .await;
        // Keeping one's own email is not a collision.
        let renamed = repo
            .update_participant(ada.id, &ParticipantDraft::new("Ada Lovelace", "ada@example.com"))
            .await
            .unwrap();

        assert_eq!(collision, Err(RepositoryError::email_in_use()));
        assert_eq!(renamed.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_update_missing_participant_is_not_found() {
        let repo = repo().await;

        let result = repo
            .update_participant(3, &ParticipantDraft::new("Nobody", "nobody@example.com"))
            .await;

        assert_eq!(result, Err(RepositoryError::not_found("Participant", 3)));
    }

    #[tokio::test]
    async fn test_list_participants_newest_first() {
        let repo = repo().await;
        repo.create_participant(&ParticipantDraft::new("Ada", "ada@example.com"))
            .await
            .unwrap();
        repo.create_participant(&ParticipantDraft::new("Grace", "grace@example.com"))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .list_participants()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["Grace", "Ada"]);
    }

    #[tokio::test]
    async fn test_registration_lifecycle() {
        let repo = repo().await;
        let competition = repo
            .create_competition(&competition_draft("Spring Open", date(2025, 4, 1)))
            .await
            .unwrap();
        let ada = repo
            .create_participant(&ParticipantDraft::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        let registration = repo
            .add_registration(ada.id, competition.id, date(2025, 3, 1))
            .await
            .unwrap();
        assert_eq!(registration.registration_date, date(2025, 3, 1));

        let competitions = repo.get_participant_competitions(ada.id).await.unwrap();
        assert_eq!(competitions, vec![competition.clone()]);

        let participants = repo
            .list_participants_by_competition(competition.id)
            .await
            .unwrap();
        assert_eq!(participants, vec![ada.clone()]);

        repo.remove_registration(ada.id, competition.id)
            .await
            .unwrap();
        assert!(repo
            .get_participant_competitions(ada.id)
            .await
            .unwrap()
            .is_empty());
        assert!(matches!(
            repo.remove_registration(ada.id, competition.id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_registration_requires_existing_parents() {
        let repo = repo().await;
        let ada = repo
            .create_participant(&ParticipantDraft::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        let missing_competition = repo.add_registration(ada.id, 99, date(2025, 3, 1)).await;
        assert_eq!(
            missing_competition,
            Err(RepositoryError::invalid_reference("Competition", 99))
        );

        let competition = repo
            .create_competition(&competition_draft("Spring Open", date(2025, 4, 1)))
            .await
            .unwrap();
        let missing_participant = repo
            .add_registration(77, competition.id, date(2025, 3, 1))
            .await;
        assert_eq!(
            missing_participant,
            Err(RepositoryError::invalid_reference("Participant", 77))
        );

        assert!(repo
            .list_participants_by_competition(competition.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let repo = repo().await;
        let competition = repo
            .create_competition(&competition_draft("Spring Open", date(2025, 4, 1)))
            .await
            .unwrap();
        let ada = repo
            .create_participant(&ParticipantDraft::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        repo.add_registration(ada.id, competition.id, date(2025, 3, 1))
            .await
            .unwrap();
        let second = repo
            .add_registration(ada.id, competition.id, date(2025, 3, 2))
            .await;

        assert_eq!(second, Err(RepositoryError::already_registered()));
        assert_eq!(
            repo.list_participants_by_competition(competition.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_deleting_competition_cascades_registrations() {
        let repo = repo().await;
        let competition = repo
            .create_competition(&competition_draft("Spring Open", date(2025, 4, 1)))
            .await
            .unwrap();
        let ada = repo
            .create_participant(&ParticipantDraft::new("Ada", "ada@example.com"))
            .await
            .unwrap();
        repo.add_registration(ada.id, competition.id, date(2025, 3, 1))
            .await
            .unwrap();

        repo.delete_competition(competition.id).await.unwrap();

        assert!(repo
            .get_participant_competitions(ada.id)
            .await
            .unwrap()
            .is_empty());
        assert!(repo
            .list_participants_by_competition(competition.id)
            .await
            .unwrap()
            .is_empty());
        // The participant itself survives.
        assert!(repo.get_participant(ada.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_participants_by_competition_latest_registration_first() {
        let repo = repo().await;
        let competition = repo
            .create_competition(&competition_draft("Spring Open", date(2025, 4, 1)))
            .await
            .unwrap();
        let ada = repo
            .create_participant(&ParticipantDraft::new("Ada", "ada@example.com"))
            .await
            .unwrap();
        let grace = repo
            .create_participant(&ParticipantDraft::new("Grace", "grace@example.com"))
            .await
            .unwrap();
        repo.add_registration(grace.id, competition.id, date(2025, 2, 1))
            .await
            .unwrap();
        repo.add_registration(ada.id, competition.id, date(2025, 3, 1))
            .await
            .unwrap();

        let ids: Vec<i64> = repo
            .list_participants_by_competition(competition.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![ada.id, grace.id]);
    }

    #[tokio::test]
    async fn test_ping() {
        let repo = repo().await;
        assert!(repo.ping().await.is_ok());
    }
}
