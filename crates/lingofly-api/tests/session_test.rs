//! Integration tests for the dialogue session.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use lingofly_api::audio::AssetAudioService;
use lingofly_core::audio::PlaybackTicket;
use serde_json::{Value, json};

const SESSION: &str = "/api/v1/session";
const START: &str = "/api/v1/session/start";
const CONTROL: &str = "/api/v1/session/control";
const FINISHED: &str = "/api/v1/session/playback-finished";

fn event_types(json: &Value) -> Vec<String> {
    json["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["kind"]["type"].as_str().unwrap().to_owned())
        .collect()
}

/// Reports the current line's playback as finished.
async fn finish_playback(app: &common::TestApp) -> Value {
    let (_, session) = common::get_json(&app.router, SESSION).await;
    let (status, json) = common::post_json(
        &app.router,
        FINISHED,
        &json!({ "ticket": session["pending_ticket"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json
}

#[tokio::test]
async fn test_session_before_start_shows_first_line_locked() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(&app.router, SESSION).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["session_id"], app.session_id.to_string());
    assert_eq!(json["phase"], "not_started");
    assert_eq!(json["cursor"], 0);
    assert_eq!(json["entry_count"], 12);
    assert_eq!(json["speaker_label"], "Pilot (You)");
    assert_eq!(json["advance_enabled"], false);
    assert_eq!(json["control"], "next");
}

#[tokio::test]
async fn test_start_plays_first_cue_and_locks_control() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, json) = common::post_empty(&app.router, START).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        event_types(&json),
        vec!["session_started", "entry_activated", "playback_requested"]
    );
    assert_eq!(json["session"]["phase"], "awaiting_audio");
    assert_eq!(json["session"]["advance_enabled"], false);
    assert_eq!(json["session"]["pending_ticket"], 1);
    assert_eq!(
        app.audio.played(),
        vec![("atc1".to_owned(), PlaybackTicket(1))]
    );
}

#[tokio::test]
async fn test_start_twice_returns_409() {
    let app = common::build_test_app();
    common::post_empty(&app.router, START).await;

    let (status, json) = common::post_empty(&app.router, START).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "already_started");
}

#[tokio::test]
async fn test_control_is_ignored_while_audio_plays() {
    let app = common::build_test_app();
    common::post_empty(&app.router, START).await;

    let (status, json) = common::post_empty(&app.router, CONTROL).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "locked");
    assert_eq!(json["session"]["cursor"], 0);
    assert!(json["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stale_ticket_does_not_unlock() {
    let app = common::build_test_app();
    common::post_empty(&app.router, START).await;

    let (status, json) =
        common::post_json(&app.router, FINISHED, &json!({ "ticket": 99 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["unlocked"], false);
    assert_eq!(json["session"]["advance_enabled"], false);
}

#[tokio::test]
async fn test_playback_finished_unlocks_then_control_advances() {
    // Arrange
    let app = common::build_test_app();
    common::post_empty(&app.router, START).await;

    // Act
    let finished = finish_playback(&app).await;
    let (status, pressed) = common::post_empty(&app.router, CONTROL).await;

    // Assert
    assert_eq!(finished["unlocked"], true);
    assert_eq!(event_types(&finished), vec!["advance_unlocked"]);
    assert_eq!(finished["events"][0]["kind"]["reason"], "playback_finished");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pressed["outcome"], "advanced");
    assert_eq!(pressed["index"], 1);
    assert_eq!(pressed["session"]["speaker"], "atc_ground");
    assert_eq!(pressed["session"]["pending_ticket"], 2);
    assert_eq!(app.audio.last_ticket(), Some(PlaybackTicket(2)));
}

#[tokio::test]
async fn test_taxi_line_moves_turns_then_moves_over_one_second() {
    // Arrange: reach the taxi readback at index 2.
    let app = common::build_test_app();
    common::start_and_unlock(&app).await;
    common::post_empty(&app.router, CONTROL).await;
    finish_playback(&app).await;

    // Act
    let (_, pressed) = common::post_empty(&app.router, CONTROL).await;
    app.clock.advance_millis(500);
    let (_, halfway) = common::get_json(&app.router, SESSION).await;
    app.clock.advance_millis(500);
    let (_, done) = common::get_json(&app.router, SESSION).await;

    // Assert
    assert_eq!(pressed["index"], 2);
    assert_eq!(pressed["session"]["pose"]["position"]["x"], 0.81);
    assert_eq!(pressed["session"]["scheduled_actions"], 2);
    assert_eq!(halfway["pose"]["heading"], 242.0);
    assert_eq!(halfway["pose"]["position"]["x"], 0.81);
    assert_eq!(halfway["scheduled_actions"], 1);
    assert_eq!(done["pose"]["position"]["x"], 0.765);
    assert_eq!(done["pose"]["position"]["y"], 0.84);
    assert_eq!(done["scheduled_actions"], 0);
    assert_eq!(done["animating"], true);
}

#[tokio::test]
async fn test_leaving_a_line_early_settles_its_actions() {
    let app = common::build_test_app();
    common::start_and_unlock(&app).await;
    common::post_empty(&app.router, CONTROL).await;
    finish_playback(&app).await;
    common::post_empty(&app.router, CONTROL).await;
    finish_playback(&app).await;

    let (_, pressed) = common::post_empty(&app.router, CONTROL).await;

    assert_eq!(pressed["index"], 3);
    assert_eq!(pressed["session"]["pose"]["heading"], 242.0);
    assert_eq!(pressed["session"]["pose"]["position"]["x"], 0.765);
    let settled: Vec<&Value> = pressed["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|event| event["kind"]["type"] == "action_applied")
        .collect();
    assert_eq!(settled.len(), 2);
    assert!(settled.iter().all(|event| event["kind"]["settled_early"] == true));
}

#[tokio::test]
async fn test_watchdog_unlocks_when_completion_never_arrives() {
    // Arrange
    let app = common::build_test_app();
    common::post_empty(&app.router, START).await;

    // Act
    app.clock.advance_secs(29);
    let (_, before) = common::get_json(&app.router, SESSION).await;
    app.clock.advance_secs(1);
    let (_, after) = common::get_json(&app.router, SESSION).await;
    let (_, events) = common::get_json(&app.router, "/api/v1/session/events?after=3").await;

    // Assert
    assert_eq!(before["advance_enabled"], false);
    assert_eq!(after["advance_enabled"], true);
    assert_eq!(event_types(&events), vec!["advance_unlocked"]);
    assert_eq!(events["events"][0]["kind"]["reason"], "timed_out");
}

#[tokio::test]
async fn test_missing_audio_file_unlocks_immediately() {
    // Arrange
    let empty_dir = std::env::temp_dir().join(format!("lingofly-empty-{}", uuid::Uuid::new_v4()));
    let app = common::build_test_app_with_audio(Arc::new(AssetAudioService::new(&empty_dir)));

    // Act
    let (status, json) = common::post_empty(&app.router, START).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["session"]["phase"], "ready_to_advance");
    assert_eq!(json["session"]["pending_ticket"], Value::Null);
    let unlock = json["events"]
        .as_array()
        .unwrap()
        .iter()
        .find(|event| event["kind"]["type"] == "advance_unlocked")
        .unwrap();
    assert_eq!(unlock["kind"]["reason"], "playback_failed");
}

#[tokio::test]
async fn test_present_audio_file_waits_for_client() {
    let asset_dir = common::asset_dir();
    let app = common::build_test_app_with_audio(Arc::new(AssetAudioService::new(&asset_dir)));

    let (_, json) = common::post_empty(&app.router, START).await;

    assert_eq!(json["session"]["phase"], "awaiting_audio");
    assert_eq!(json["session"]["pending_ticket"], 1);
}

#[tokio::test]
async fn test_events_after_returns_only_newer_events() {
    let app = common::build_test_app();
    common::post_empty(&app.router, START).await;

    let (status, all) = common::get_json(&app.router, "/api/v1/session/events").await;
    let (_, newer) = common::get_json(&app.router, "/api/v1/session/events?after=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["events"].as_array().unwrap().len(), 3);
    assert_eq!(event_types(&newer), vec!["playback_requested"]);
    assert_eq!(newer["events"][0]["metadata"]["sequence_number"], 3);
    assert_eq!(newer["events"][0]["metadata"]["event_type"], "sequencer.playback_requested");
}

#[tokio::test]
async fn test_full_walk_ends_session_and_signals_host() {
    // Arrange
    let app = common::build_test_app();
    common::post_empty(&app.router, START).await;
    for expected in 1..12 {
        finish_playback(&app).await;
        let (_, pressed) = common::post_empty(&app.router, CONTROL).await;
        assert_eq!(pressed["index"], expected);
    }
    finish_playback(&app).await;
    let (_, last) = common::get_json(&app.router, SESSION).await;

    // Act
    let (status, ended) = common::post_empty(&app.router, CONTROL).await;

    // Assert
    assert_eq!(last["control"], "finish");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ended["outcome"], "ended");
    assert_eq!(ended["session"]["phase"], "terminated");
    assert_eq!(event_types(&ended), vec!["session_ended"]);
    assert_eq!(ended["events"][0]["kind"]["final_index"], 11);
    assert_eq!(app.host.ended_sessions(), vec![app.session_id]);
}

#[tokio::test]
async fn test_commands_after_end_return_410() {
    let app = common::build_test_app();
    common::post_empty(&app.router, START).await;
    for _ in 0..11 {
        finish_playback(&app).await;
        common::post_empty(&app.router, CONTROL).await;
    }
    finish_playback(&app).await;
    common::post_empty(&app.router, CONTROL).await;

    let (control, control_json) = common::post_empty(&app.router, CONTROL).await;
    let (finished, _) = common::post_json(&app.router, FINISHED, &json!({ "ticket": 12 })).await;
    let (start, _) = common::post_empty(&app.router, START).await;

    assert_eq!(control, StatusCode::GONE);
    assert_eq!(control_json["error"], "session_ended");
    assert_eq!(finished, StatusCode::GONE);
    assert_eq!(start, StatusCode::GONE);
    assert_eq!(app.host.ended_sessions().len(), 1);
}

#[tokio::test]
async fn test_malformed_ticket_is_rejected() {
    let app = common::build_test_app();
    common::post_empty(&app.router, START).await;

    let (status, _) =
        common::post_json(&app.router, FINISHED, &json!({ "ticket": "soon" })).await;

    assert!(status.is_client_error());
}
