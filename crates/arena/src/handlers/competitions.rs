//! Competition CRUD handlers.
//!
//! Reads and writes go through the cached competition repository, so the
//! handlers never touch the cache directly.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use arena_core::competition::{Competition, CompetitionRequest};

use super::{json_body, message, parse_id, AppError};
use crate::state::AppState;

/// List all competitions (GET /api/competitions).
pub async fn list_competitions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Competition>>, AppError> {
    let competitions = state.competitions.list_competitions().await?;
    Ok(Json(competitions))
}

/// Get a single competition by ID (GET /api/competitions/{id}).
pub async fn get_competition(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Competition>, AppError> {
    let id = parse_id(&id, "competition")?;
    let competition = state.competitions.get_competition(id).await?;
    Ok(Json(competition))
}

/// Create a new competition (POST /api/competitions).
pub async fn create_competition(
    State(state): State<AppState>,
    payload: Result<Json<CompetitionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let draft = json_body(payload)?.into_draft()?;
    let competition = state.competitions.create_competition(&draft).await?;

    Ok((StatusCode::CREATED, Json(competition)))
}

/// Replace a competition (PUT /api/competitions/{id}).
pub async fn update_competition(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CompetitionRequest>, JsonRejection>,
) -> Result<Json<Competition>, AppError> {
    let id = parse_id(&id, "competition")?;
    let draft = json_body(payload)?.into_draft()?;
    let competition = state.competitions.update_competition(id, &draft).await?;

    Ok(Json(competition))
}

/// Delete a competition (DELETE /api/competitions/{id}).
pub async fn delete_competition(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "competition")?;
    state.competitions.delete_competition(id).await?;

    Ok(message("Competition deleted successfully"))
}
