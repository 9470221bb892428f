//! Storage backend implementations.
//!
//! `sqlite` provides the concrete repositories defined by
//! `arena_core::storage`; `cached` wraps any of them with the cache-aside
//! protocol.

pub mod cached;
pub mod sqlite;

pub use cached::{CachedCompetitionRepository, CachedParticipantRepository};
pub use sqlite::SqliteRepository;
