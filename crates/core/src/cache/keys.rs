//! Cache key derivation.
//!
//! Keys follow three shapes: `entity:all` for whole collections,
//! `entity:{id}` for single records and `entity:parent:{id}` for lists
//! scoped to a relationship.

/// Key for the list of all competitions.
pub const COMPETITIONS_ALL_KEY: &str = "competitions:all";

/// Key for the list of all participants.
pub const PARTICIPANTS_ALL_KEY: &str = "participants:all";

/// Returns the cache key for a single competition.
pub fn competition_key(competition_id: i64) -> String {
    format!("competitions:{}", competition_id)
}

/// Returns the cache key for a single participant.
pub fn participant_key(participant_id: i64) -> String {
    format!("participants:{}", participant_id)
}

/// Returns the cache key for the participants registered in a competition.
///
/// # Examples
///
/// ```
/// use arena_core::cache::competition_participants_key;
///
/// assert_eq!(competition_participants_key(7), "participants:competition:7");
/// ```
pub fn competition_participants_key(competition_id: i64) -> String {
    format!("participants:competition:{}", competition_id)
}
