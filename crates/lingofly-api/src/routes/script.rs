//! Read-only access to the scenario's script.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use lingofly_core::geometry::Pose;
use lingofly_script::domain::entry::ScriptEntry;
use serde::Serialize;

use crate::state::AppState;

/// Response body for GET /api/v1/script.
#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    /// Scenario name.
    pub title: &'static str,
    /// Where the plane icon starts.
    pub initial_pose: Pose,
    /// Number of lines.
    pub entry_count: usize,
    /// Every line in order.
    pub entries: Vec<ScriptEntry>,
}

/// GET /
async fn get_script(State(state): State<AppState>) -> Json<ScriptResponse> {
    let view = state.scenario.view();
    Json(ScriptResponse {
        title: view.title,
        initial_pose: view.initial_pose,
        entry_count: view.entries.len(),
        entries: view.entries.to_vec(),
    })
}

/// Returns the router for the script.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_script))
}
