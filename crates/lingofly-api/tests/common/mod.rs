//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use lingofly_core::audio::AudioService;
use lingofly_script::scenarios::los_alamitos_departure;
use lingofly_sequencer::domain::sequencer::Sequencer;
use lingofly_test_support::{ManualClock, RecordingAudioService, RecordingSessionHost};
use tower::ServiceExt;
use uuid::Uuid;

use lingofly_api::routes;
use lingofly_api::state::AppState;

/// The app under test together with the doubles behind it.
pub struct TestApp {
    pub router: Router,
    pub session_id: Uuid,
    pub clock: Arc<ManualClock>,
    /// Recording double; stays empty when a custom audio service is injected.
    pub audio: Arc<RecordingAudioService>,
    pub host: Arc<RecordingSessionHost>,
    pub asset_dir: PathBuf,
}

/// A fresh asset directory holding a single `atc1.mp3`.
pub fn asset_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lingofly-api-test-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("atc1.mp3"), b"ID3 test cue").unwrap();
    dir
}

/// Build the full app over the Los Alamitos scenario with a manual clock,
/// a recording audio service and a recording host. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app() -> TestApp {
    let audio = Arc::new(RecordingAudioService::new());
    let mut app = build_test_app_with_audio(audio.clone());
    app.audio = audio;
    app
}

/// Like [`build_test_app`], with a custom audio service.
pub fn build_test_app_with_audio(audio_service: Arc<dyn AudioService>) -> TestApp {
    let clock = Arc::new(ManualClock::at_fixed_now());
    let host = Arc::new(RecordingSessionHost::new());
    let scenario = los_alamitos_departure().unwrap();
    let session_id = Uuid::new_v4();
    let sequencer = Sequencer::new(session_id, scenario.script.clone(), scenario.initial_pose);
    let state = AppState::new(
        Arc::new(scenario),
        sequencer,
        clock.clone(),
        audio_service,
        host.clone(),
    );
    let asset_dir = asset_dir();

    TestApp {
        router: routes::app(state, &asset_dir),
        session_id,
        clock,
        audio: Arc::new(RecordingAudioService::new()),
        host,
        asset_dir,
    }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Start the session and report playback of the first line as finished.
pub async fn start_and_unlock(app: &TestApp) {
    let (status, json) = post_empty(&app.router, "/api/v1/session/start").await;
    assert_eq!(status, StatusCode::OK);
    let ticket = json["session"]["pending_ticket"].clone();
    let (status, _) = post_json(
        &app.router,
        "/api/v1/session/playback-finished",
        &serde_json::json!({ "ticket": ticket }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
