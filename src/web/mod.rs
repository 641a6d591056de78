//! Web form front end.

pub mod render;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::advisor::{CrewRunner, LiveRunner};
use crate::config::Settings;

/// Shared state for all handlers.
pub struct AppState {
    pub runner: Arc<dyn CrewRunner>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/advice", post(routes::submit_advice))
        .route("/api/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve the form until the process exits.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let addr = settings.bind_address();
    let state = Arc::new(AppState {
        runner: Arc::new(LiveRunner::new(settings)),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
