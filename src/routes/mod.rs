//! Router assembly: HTTP endpoints, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - game API under `/api/v1/...`
/// - CORS (allow any origin/method/headers), adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/rounds", post(http::http_post_round))
        .route("/api/v1/guess", post(http::http_post_guess))
        .route("/api/v1/hints", post(http::http_post_hint))
        .route("/api/v1/jokers", post(http::http_post_joker))
        .route("/api/v1/field-answers", post(http::http_post_field_answers))
        .route("/api/v1/options", get(http::http_get_options))
        .route("/api/v1/options/half", get(http::http_get_half_options))
        .route("/api/v1/options/coherent", get(http::http_get_coherent_options))
        .route("/api/v1/game/validate", post(http::http_post_validate_game))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}
