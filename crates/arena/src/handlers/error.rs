//! Error responses for handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use arena_core::competition::ValidationError;
use arena_core::storage::{
    repository_error_public_message, repository_error_to_status_code, RepositoryError,
    INTERNAL_ERROR_MESSAGE,
};

/// A request the handlers rejected before reaching a repository.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct BadRequest(pub String);

/// Handler error that wraps `anyhow::Error`.
///
/// The status code comes from the typed error inside, found by downcasting.
/// Anything unrecognised is answered with a generic 500.
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(BadRequest(message.into()).into())
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return (status, repository_error_public_message(repo_error));
        }

        if let Some(validation_error) = self.0.downcast_ref::<ValidationError>() {
            return (StatusCode::BAD_REQUEST, validation_error.to_string());
        }

        if let Some(bad_request) = self.0.downcast_ref::<BadRequest>() {
            return (StatusCode::BAD_REQUEST, bad_request.to_string());
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR_MESSAGE.to_string(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
