use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A person who can register for competitions.
///
/// The email address is unique across all participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Membership of a participant in a competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub competition_id: i64,
    pub participant_id: i64,
    pub registration_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The full set of caller-supplied competition fields.
///
/// Used for both creation and update: updates replace every field, there
/// are no partial updates. Identity and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionDraft {
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
}

impl CompetitionDraft {
    /// Creates a draft with an empty description.
    pub fn new(name: impl Into<String>, date: NaiveDate, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            date,
            location: location.into(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The full set of caller-supplied participant fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDraft {
    pub name: String,
    pub email: String,
}

impl ParticipantDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
