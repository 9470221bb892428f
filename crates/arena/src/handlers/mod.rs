//! HTTP handlers for the `/api` routes.

pub mod competitions;
pub mod error;
pub mod health;
pub mod participants;

use axum::{extract::rejection::JsonRejection, Json};

pub use error::AppError;

/// Parses a numeric path or query ID, naming the entity in the error.
fn parse_id(raw: &str, entity: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::bad_request(format!("Invalid {entity} ID")))
}

/// Unwraps a JSON body, answering malformed payloads with a 400.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed request body");
            Err(AppError::bad_request("Invalid request format"))
        }
    }
}

/// Body for operations that only confirm success.
fn message(text: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": text }))
}
