//! Routes for the running dialogue session.
//!
//! Every request pumps the sequencer clock before it reads or changes
//! anything, so a response never shows an action that should already have
//! fired or a watchdog that should already have expired.

use axum::extract::{Query, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use lingofly_core::audio::PlaybackTicket;
use lingofly_sequencer::application::{command_handlers, query_handlers};
use lingofly_sequencer::domain::commands;
use lingofly_sequencer::domain::events::SequencerEvent;
use lingofly_sequencer::domain::sequencer::ControlOutcome;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /playback-finished.
#[derive(Debug, Deserialize)]
pub struct PlaybackFinishedRequest {
    /// The ticket the playback was requested with.
    pub ticket: PlaybackTicket,
}

/// Query string for GET /events.
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    /// Only return events with a greater sequence number.
    #[serde(default)]
    pub after: i64,
}

/// Response body after the session has started.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// Events the command produced.
    pub events: Vec<SequencerEvent>,
    /// The session after the command.
    pub session: query_handlers::SessionView,
}

/// Response body for POST /control.
#[derive(Debug, Serialize)]
pub struct ControlResponse {
    /// What the press did.
    #[serde(flatten)]
    pub outcome: ControlOutcome,
    /// Events the press produced.
    pub events: Vec<SequencerEvent>,
    /// The session after the press.
    pub session: query_handlers::SessionView,
}

/// Response body for POST /playback-finished.
#[derive(Debug, Serialize)]
pub struct PlaybackFinishedResponse {
    /// Whether the report unlocked the advance control.
    pub unlocked: bool,
    /// Events the report produced.
    pub events: Vec<SequencerEvent>,
    /// The session after the report.
    pub session: query_handlers::SessionView,
}

/// Response body for GET /events.
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    /// Recorded events, oldest first.
    pub events: Vec<SequencerEvent>,
}

/// GET /
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
) -> Result<Json<query_handlers::SessionView>, ApiError> {
    let mut session = state.lock_session();
    session.tick(state.clock.as_ref());
    let view = query_handlers::get_session_view(&session.sequencer, state.clock.as_ref())?;
    Ok(Json(view))
}

/// POST /start
#[instrument(skip(state))]
async fn start_session(State(state): State<AppState>) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::StartSession {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling start_session command");

    let mut session = state.lock_session();
    let events = command_handlers::handle_start_session(
        &command,
        &mut session.sequencer,
        state.clock.as_ref(),
        state.audio.as_ref(),
    )?;
    session.record(events.clone());
    let view = query_handlers::get_session_view(&session.sequencer, state.clock.as_ref())?;

    Ok(Json(CommandResponse {
        events,
        session: view,
    }))
}

/// POST /control
#[instrument(skip(state))]
async fn press_control(State(state): State<AppState>) -> Result<Json<ControlResponse>, ApiError> {
    let command = commands::PressControl {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling press_control command");

    let mut session = state.lock_session();
    let (outcome, events) = command_handlers::handle_press_control(
        &command,
        &mut session.sequencer,
        state.clock.as_ref(),
        state.audio.as_ref(),
        state.host.as_ref(),
    )?;
    session.record(events.clone());
    let view = query_handlers::get_session_view(&session.sequencer, state.clock.as_ref())?;

    Ok(Json(ControlResponse {
        outcome,
        events,
        session: view,
    }))
}

/// POST /playback-finished
#[instrument(skip(state, request), fields(ticket = %request.ticket))]
async fn playback_finished(
    State(state): State<AppState>,
    Json(request): Json<PlaybackFinishedRequest>,
) -> Result<Json<PlaybackFinishedResponse>, ApiError> {
    let command = commands::ReportPlaybackFinished {
        correlation_id: Uuid::new_v4(),
        ticket: request.ticket,
    };

    info!(correlation_id = %command.correlation_id, "handling playback_finished command");

    let mut session = state.lock_session();
    let (unlocked, events) = command_handlers::handle_playback_finished(
        &command,
        &mut session.sequencer,
        state.clock.as_ref(),
    )?;
    session.record(events.clone());
    let view = query_handlers::get_session_view(&session.sequencer, state.clock.as_ref())?;

    Ok(Json(PlaybackFinishedResponse {
        unlocked,
        events,
        session: view,
    }))
}

/// GET /events
#[instrument(skip(state))]
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<EventsResponse> {
    let mut session = state.lock_session();
    session.tick(state.clock.as_ref());
    Json(EventsResponse {
        events: session.events_after(query.after).to_vec(),
    })
}

/// Returns the router for the session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session))
        .route("/start", post(start_session))
        .route("/control", post(press_control))
        .route("/playback-finished", post(playback_finished))
        .route("/events", get(list_events))
}
