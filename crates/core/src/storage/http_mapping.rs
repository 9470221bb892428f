//! Pure functions for mapping repository errors to HTTP responses.
//!
//! Store failures never leak their detail: callers get a generic message
//! and the detail is left for logging.

use super::RepositoryError;

/// Message returned to clients in place of store failure details.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `Conflict` -> 400 (Bad Request)
/// - `InvalidReference` -> 400 (Bad Request)
/// - `ConnectionFailed` -> 500 (Internal Server Error)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use arena_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::not_found("Competition", 1);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::Conflict(_) => 400,
        RepositoryError::InvalidReference { .. } => 400,
        RepositoryError::ConnectionFailed(_) => 500,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
    }
}

/// Returns the message that may be shown to a client for this error.
pub fn repository_error_public_message(error: &RepositoryError) -> String {
    if error.is_store_failure() {
        INTERNAL_ERROR_MESSAGE.to_string()
    } else {
        error.to_string()
    }
}
