//! HTTP routes.

pub mod health;
pub mod script;
pub mod session;

use std::path::Path;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application: API routes plus the audio cues under
/// `/assets`, served from `asset_dir`.
pub fn app(state: AppState, asset_dir: &Path) -> Router {
    // TODO: Replace CorsLayer::permissive() with the view layer's origin once it is hosted.
    Router::new()
        .merge(health::router())
        .nest("/api/v1/script", script::router())
        .nest("/api/v1/session", session::router())
        .nest_service("/assets", ServeDir::new(asset_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
