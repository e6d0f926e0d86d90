//! Routes for the grading API. Questions are served without their marking
//! points; answers are graded server-side and come back with per-point hits.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// `/api/v1` grading endpoints plus the `/ws` socket speaking the same operations.
/// Anything else falls through to the study UI build in `./static`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/question", get(http::http_get_question))
        .route("/api/v1/questions", get(http::http_list_questions))
        .route("/api/v1/topics", get(http::http_get_topics))
        .route("/api/v1/answer", post(http::http_post_answer))
        .route("/api/v1/hint", get(http::http_get_hint))
        .route("/api/v1/reveal", get(http::http_get_reveal))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}
