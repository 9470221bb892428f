use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{0}")]
    Conflict(String),
    #[error("{entity_type} does not exist: {id}")]
    InvalidReference {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn invalid_reference(entity_type: &'static str, id: impl ToString) -> Self {
        Self::InvalidReference {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Conflict raised when an email already belongs to a participant.
    pub fn email_in_use() -> Self {
        Self::Conflict("email already registered".to_string())
    }

    /// Conflict raised when a participant is already in a competition.
    pub fn already_registered() -> Self {
        Self::Conflict("participant already registered for this competition".to_string())
    }

    /// Returns true for infrastructure failures of the store itself, as
    /// opposed to outcomes caused by the request.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::QueryFailed(_) | Self::Serialization(_)
        )
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
