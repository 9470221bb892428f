//! Participant CRUD and registration handlers.
//!
//! Registrations are nested under the participant: `POST` adds one, `DELETE`
//! on `/{id}/competitions/{competition_id}` removes it.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use arena_core::competition::{
    Competition, Participant, ParticipantRequest, RegistrationRequest,
};

use super::{json_body, message, parse_id, AppError};
use crate::state::AppState;

/// Query parameters for GET /api/participants.
#[derive(Debug, Default, Deserialize)]
pub struct ParticipantsQuery {
    pub competition_id: Option<String>,
}

/// List participants, optionally those of one competition (GET /api/participants).
pub async fn list_participants(
    State(state): State<AppState>,
    Query(query): Query<ParticipantsQuery>,
) -> Result<Json<Vec<Participant>>, AppError> {
    let participants = match query.competition_id.as_deref() {
        Some(raw) if !raw.is_empty() => {
            let competition_id = parse_id(raw, "competition")?;
            state
                .participants
                .list_participants_by_competition(competition_id)
                .await?
        }
        _ => state.participants.list_participants().await?,
    };

    Ok(Json(participants))
}

/// Get a single participant by ID (GET /api/participants/{id}).
pub async fn get_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Participant>, AppError> {
    let id = parse_id(&id, "participant")?;
    let participant = state.participants.get_participant(id).await?;
    Ok(Json(participant))
}

/// Competitions a participant is registered in (GET /api/participants/{id}/competitions).
pub async fn get_participant_competitions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Competition>>, AppError> {
    let id = parse_id(&id, "participant")?;
    let competitions = state.participants.get_participant_competitions(id).await?;
    Ok(Json(competitions))
}

/// Create a new participant (POST /api/participants).
pub async fn create_participant(
    State(state): State<AppState>,
    payload: Result<Json<ParticipantRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let draft = json_body(payload)?.into_draft()?;
    let participant = state.participants.create_participant(&draft).await?;

    Ok((StatusCode::CREATED, Json(participant)))
}

/// Replace a participant (PUT /api/participants/{id}).
pub async fn update_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ParticipantRequest>, JsonRejection>,
) -> Result<Json<Participant>, AppError> {
    let id = parse_id(&id, "participant")?;
    let draft = json_body(payload)?.into_draft()?;
    let participant = state.participants.update_participant(id, &draft).await?;

    Ok(Json(participant))
}

/// Delete a participant (DELETE /api/participants/{id}).
pub async fn delete_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "participant")?;
    state.participants.delete_participant(id).await?;

    Ok(message("Participant deleted successfully"))
}

/// Register a participant in a competition (POST /api/participants/{id}/competitions).
pub async fn add_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let participant_id = parse_id(&id, "participant")?;
    let (competition_id, registration_date) = json_body(payload)?.into_parts()?;

    state
        .participants
        .add_registration(participant_id, competition_id, registration_date)
        .await?;

    Ok(message("Participant added to competition successfully"))
}

/// Remove a registration (DELETE /api/participants/{id}/competitions/{competition_id}).
pub async fn remove_registration(
    State(state): State<AppState>,
    Path((id, competition_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let participant_id = parse_id(&id, "participant")?;
    let competition_id = parse_id(&competition_id, "competition")?;

    state
        .participants
        .remove_registration(participant_id, competition_id)
        .await?;

    Ok(message("Participant removed from competition successfully"))
}
