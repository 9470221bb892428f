//! Health check endpoint.
//!
//! Always answers 200; unreachable stores are reported as `down`.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
    pub cache: &'static str,
}

fn up_or_down<E>(result: Result<(), E>) -> &'static str {
    if result.is_ok() {
        "up"
    } else {
        "down"
    }
}

/// GET /api - Reachability of the persistent store and the cache.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let (database, cache) = tokio::join!(state.database.ping(), state.cache.ping());

    if let Err(err) = &database {
        tracing::warn!(error = %err, "Database health check failed");
    }
    if let Err(err) = &cache {
        tracing::warn!(error = %err, "Cache health check failed");
    }

    Json(HealthStatus {
        status: "ok",
        database: up_or_down(database),
        cache: up_or_down(cache),
    })
}
