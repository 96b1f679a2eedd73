use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::SharedState;

/// Build the Axum router with all routes and middleware.
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness (outside /api prefix)
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        // Game
        .route(
            "/api/game",
            post(handlers::start_game).get(handlers::get_game),
        )
        .route("/api/game/bids", post(handlers::set_bids))
        .route("/api/game/tricks", post(handlers::record_tricks))
        .route("/api/game/scores", get(handlers::get_scores))
        // Original flat routes
        .route("/start_game", post(handlers::start_game))
        .route("/set_bids", post(handlers::set_bids))
        .route("/record_tricks", post(handlers::record_tricks))
        .route("/show_scores", get(handlers::get_scores))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
