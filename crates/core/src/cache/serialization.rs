//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! Cache values are JSON so they can be inspected with any Redis client.

use crate::competition::{Competition, Participant};
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a competition to JSON bytes.
pub fn serialize_competition(competition: &Competition) -> Result<Vec<u8>> {
    serde_json::to_vec(competition).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a competition.
pub fn deserialize_competition(bytes: &[u8]) -> Result<Competition> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a slice of competitions to JSON bytes.
pub fn serialize_competitions(competitions: &[Competition]) -> Result<Vec<u8>> {
    serde_json::to_vec(competitions)
        .map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a vector of competitions.
pub fn deserialize_competitions(bytes: &[u8]) -> Result<Vec<Competition>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a participant to JSON bytes.
pub fn serialize_participant(participant: &Participant) -> Result<Vec<u8>> {
    serde_json::to_vec(participant).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a participant.
pub fn deserialize_participant(bytes: &[u8]) -> Result<Participant> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a slice of participants to JSON bytes.
pub fn serialize_participants(participants: &[Participant]) -> Result<Vec<u8>> {
    serde_json::to_vec(participants)
        .map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a vector of participants.
pub fn deserialize_participants(bytes: &[u8]) -> Result<Vec<Participant>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
