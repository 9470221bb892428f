//! Router construction and middleware.

use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        competitions::{
            create_competition, delete_competition, get_competition, list_competitions,
            update_competition,
        },
        health::health,
        participants::{
            add_registration, create_participant, delete_participant, get_participant,
            get_participant_competitions, list_participants, remove_registration,
            update_participant,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/", get(health))
        // Competition routes
        .route(
            "/competitions",
            get(list_competitions).post(create_competition),
        )
        .route(
            "/competitions/{id}",
            get(get_competition)
                .put(update_competition)
                .delete(delete_competition),
        )
        // Participant routes
        .route(
            "/participants",
            get(list_participants).post(create_participant),
        )
        .route(
            "/participants/{id}",
            get(get_participant)
                .put(update_participant)
                .delete(delete_participant),
        )
        .route(
            "/participants/{id}/competitions",
            get(get_participant_competitions).post(add_registration),
        )
        .route(
            "/participants/{id}/competitions/{competition_id}",
            delete(remove_registration),
        )
        .layer(cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
