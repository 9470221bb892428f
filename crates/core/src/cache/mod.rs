mod error;
mod invalidation;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use invalidation::Mutation;
pub use keys::{
    competition_key, competition_participants_key, participant_key, COMPETITIONS_ALL_KEY,
    PARTICIPANTS_ALL_KEY,
};
pub use serialization::{
    deserialize_competition, deserialize_competitions, deserialize_participant,
    deserialize_participants, serialize_competition, serialize_competitions,
    serialize_participant, serialize_participants, SerializationError,
};
pub use traits::Cache;
