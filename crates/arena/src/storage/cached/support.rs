//! Cache-aside building blocks shared by the decorators.
//!
//! Every cache failure ends here as a log line. None of these helpers can
//! fail the repository operation that called them.

use std::time::Duration;

use arena_core::cache::{Cache, Mutation, SerializationError};

/// Looks up `key` and decodes it, treating errors and bad payloads as a miss.
///
/// A payload that fails to decode is left in place; the next store read
/// overwrites it.
pub(super) async fn lookup<C, T>(
    cache: &C,
    key: &str,
    decode: fn(&[u8]) -> Result<T, SerializationError>,
) -> Option<T>
where
    C: Cache + ?Sized,
{
    match cache.get(key).await {
        Ok(Some(bytes)) => match decode(&bytes) {
            Ok(value) => {
                tracing::trace!(key, "Cache hit");
                Some(value)
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "Cached payload could not be decoded");
                None
            }
        },
        Ok(None) => {
            tracing::trace!(key, "Cache miss");
            None
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "Cache read failed");
            None
        }
    }
}

/// Best-effort write of an encoded value under `key`.
pub(super) async fn populate<C>(
    cache: &C,
    key: &str,
    encoded: Result<Vec<u8>, SerializationError>,
    ttl: Duration,
) where
    C: Cache + ?Sized,
{
    let bytes = match encoded {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(key, error = %err, "Failed to encode value for cache");
            return;
        }
    };

    if let Err(err) = cache.set(key, &bytes, Some(ttl)).await {
        tracing::warn!(key, error = %err, "Failed to populate cache");
    }
}

/// Deletes every key the mutation may have made stale.
pub(super) async fn invalidate<C>(cache: &C, mutation: Mutation)
where
    C: Cache + ?Sized,
{
    for key in mutation.invalidated_keys() {
        if let Err(err) = cache.delete(&key).await {
            tracing::warn!(key = %key, ?mutation, error = %err, "Failed to invalidate cache key");
        }
    }
}
