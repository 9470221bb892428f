//! Cached repository decorators.
//!
//! The decorators implement the cache-aside pattern over any repository:
//!
//! - **Reads**: Check cache first, on miss fetch from repository and populate cache
//! - **Writes**: Persist to repository, then delete the keys the write made stale
//!
//! The store stays the only source of truth. Cache errors are logged and
//! never reach the caller.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(SqliteRepository::new("arena.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//!
//! let competitions = CachedCompetitionRepository::new(repo, cache, Duration::from_secs(300));
//! ```

mod competition;
mod participant;
mod support;

pub use competition::CachedCompetitionRepository;
pub use participant::CachedParticipantRepository;
