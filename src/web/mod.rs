mod error;
mod handlers;
mod labels;
mod routes;
pub mod security;
mod state;

pub use state::AppState;

use crate::services::api::CatalogSource;
use crate::Config;
use anyhow::Result;
use axum::middleware;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// The viewer application, ready to be served or driven directly in tests.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::public_routes())
        .fallback(handlers::public::fallback)
        .layer(middleware::from_fn(security::apply_security_headers))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config, source: Arc<dyn CatalogSource>, addr: &str) -> Result<()> {
    let state = Arc::new(AppState::new(config, source)?);
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
