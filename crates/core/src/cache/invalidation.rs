//! Invalidation fan-out for successful writes.
//!
//! Every mutation maps to the exact set of keys whose cached payload may
//! be stale once the write has been committed to the persistent store.

use super::keys::{
    competition_key, competition_participants_key, participant_key, COMPETITIONS_ALL_KEY,
    PARTICIPANTS_ALL_KEY,
};

/// A committed write against the persistent store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CompetitionCreated,
    CompetitionUpdated { id: i64 },
    CompetitionDeleted { id: i64 },
    ParticipantCreated,
    ParticipantUpdated { id: i64 },
    ParticipantDeleted { id: i64 },
    RegistrationAdded {
        participant_id: i64,
        competition_id: i64,
    },
    RegistrationRemoved {
        participant_id: i64,
        competition_id: i64,
    },
}

impl Mutation {
    /// Returns the keys that must be removed from the cache after this mutation.
    pub fn invalidated_keys(&self) -> Vec<String> {
        match *self {
            Mutation::CompetitionCreated => vec![COMPETITIONS_ALL_KEY.to_string()],
            Mutation::CompetitionUpdated { id } => {
                vec![COMPETITIONS_ALL_KEY.to_string(), competition_key(id)]
            }
            Mutation::CompetitionDeleted { id } => vec![
                COMPETITIONS_ALL_KEY.to_string(),
                competition_key(id),
                competition_participants_key(id),
            ],
            Mutation::ParticipantCreated => vec![PARTICIPANTS_ALL_KEY.to_string()],
            Mutation::ParticipantUpdated { id } | Mutation::ParticipantDeleted { id } => {
                vec![PARTICIPANTS_ALL_KEY.to_string(), participant_key(id)]
            }
            Mutation::RegistrationAdded { competition_id, .. }
            | Mutation::RegistrationRemoved { competition_id, .. } => vec![
                PARTICIPANTS_ALL_KEY.to_string(),
                competition_participants_key(competition_id),
            ],
        }
    }
}
