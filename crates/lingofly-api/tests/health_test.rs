//! Integration tests for the health endpoint.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(&app.router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = common::build_test_app();

    let (status, _) = common::get_json(&app.router, "/api/v1/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_audio_cues_are_served_from_asset_dir() {
    let app = common::build_test_app();

    let (found, _) = common::get_json(&app.router, "/assets/atc1.mp3").await;
    let (missing, _) = common::get_json(&app.router, "/assets/atc9.mp3").await;

    assert_eq!(found, StatusCode::OK);
    assert_eq!(missing, StatusCode::NOT_FOUND);
}
