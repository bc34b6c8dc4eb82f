use super::handlers;
use super::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::public::index))
        .route("/rankings", get(handlers::public::rankings))
        .route("/rankings/:weight_class", get(handlers::public::weight_class))
        .route("/fighters", get(handlers::public::fighters))
        .route("/fighters/:fighter_name", get(handlers::public::fighter))
        .route(
            "/fighters/:fighter_name/stats",
            get(handlers::public::fighter_stats),
        )
        .route("/events", get(handlers::public::events))
        .route("/events/:event_name", get(handlers::public::event))
        .route("/upcoming", get(handlers::public::upcoming))
        .route("/compare", get(handlers::public::compare))
        .route("/health", get(handlers::public::health))
}
