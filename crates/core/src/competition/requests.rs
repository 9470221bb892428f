//! API request payloads.
//!
//! Every field is optional at the wire level so that a missing field is
//! reported as a validation failure rather than a parse failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::types::{CompetitionDraft, ParticipantDraft};
use super::validation::{parse_date, validate_competition, validate_participant};

/// Request body for creating or replacing a competition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Calendar date in `YYYY-MM-DD` form.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: String,
}

impl CompetitionRequest {
    /// Parses and validates the request into a draft.
    pub fn into_draft(self) -> Result<CompetitionDraft, ValidationError> {
        let date = match self.date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_date("date", raw)?,
            _ => return Err(ValidationError::Required("date")),
        };

        let draft = CompetitionDraft {
            name: self.name,
            description: self.description,
            date,
            location: self.location,
        };
        validate_competition(&draft)?;
        Ok(draft)
    }
}

/// Request body for creating or replacing a participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl ParticipantRequest {
    /// Validates the request into a draft.
    pub fn into_draft(self) -> Result<ParticipantDraft, ValidationError> {
        let draft = ParticipantDraft {
            name: self.name,
            email: self.email,
        };
        validate_participant(&draft)?;
        Ok(draft)
    }
}

/// Request body for registering a participant in a competition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub competition_id: Option<i64>,
    /// Registration date in `YYYY-MM-DD` form.
    #[serde(default)]
    pub registration_date: Option<String>,
}

impl RegistrationRequest {
    /// Returns the target competition and the parsed registration date.
    pub fn into_parts(self) -> Result<(i64, NaiveDate), ValidationError> {
        let competition_id = self
            .competition_id
            .ok_or(ValidationError::Required("competition_id"))?;
        let raw = self
            .registration_date
            .filter(|raw| !raw.trim().is_empty())
            .ok_or(ValidationError::Required("registration_date"))?;
        let date = parse_date("registration date", &raw)?;
        Ok((competition_id, date))
    }
}
