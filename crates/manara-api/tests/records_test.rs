//! HTTP tests for tracked record updates and deletes.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{Admin, TestApp};
use manara_core::types::ModelType;

#[tokio::test]
async fn test_show_record() {
    let app = TestApp::new();
    app.seed(ModelType::Product, 7).await;
    let admin = Admin::new();

    let response = app
        .request("GET", "/api/admin/records/product/7", None, Some(&admin))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["record"]["id"], "7");
    assert_eq!(response.body["data"]["undo"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_missing_session_headers_are_rejected() {
    let app = TestApp::new();
    app.seed(ModelType::Product, 7).await;

    let response = app
        .request("GET", "/api/admin/records/product/7", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_update_reports_changes_and_offers_undo() {
    let app = TestApp::new();
    app.seed(ModelType::Product, 7).await;
    let admin = Admin::new();

    let response = app
        .request(
            "PUT",
            "/api/admin/records/product/7",
            Some(json!({ "name_en": "Rebar 12mm", "is_active": true })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["status"], "updated");
    // `is_active` was already "1".
    assert_eq!(data["changes"].as_array().map(Vec::len), Some(1));
    assert_eq!(data["changes"][0]["field"], "name_en");
    assert_eq!(data["undo"]["field_count"], 1);

    let shown = app
        .request("GET", "/api/admin/records/product/7", None, Some(&admin))
        .await;
    assert_eq!(shown.body["data"]["record"]["name_en"], "Rebar 12mm");
    assert_eq!(shown.body["data"]["undo"]["summary"], "Changed Name (EN)");
}

#[tokio::test]
async fn test_noop_update_returns_no_changes() {
    let app = TestApp::new();
    app.seed(ModelType::Career, 42).await;
    let admin = Admin::new();

    let response = app
        .request(
            "PUT",
            "/api/admin/records/career/42",
            Some(json!({ "status": "status 42" })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!({ "status": "no_changes" }));
    assert!(app.services.log.entries().await.is_empty());
}

#[tokio::test]
async fn test_unknown_model_type_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .request(
            "PUT",
            "/api/admin/records/newsletter/1",
            Some(json!({ "title": "x" })),
            Some(&Admin::new()),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "UNKNOWN_MODEL_TYPE");
}

#[tokio::test]
async fn test_untracked_field_is_validation_error() {
    let app = TestApp::new();
    app.seed(ModelType::Media, 3).await;
    let response = app
        .request(
            "PUT",
            "/api/admin/records/media/3",
            Some(json!({ "size_bytes": 1024 })),
            Some(&Admin::new()),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_missing_record_is_not_found() {
    let app = TestApp::new();
    let response = app
        .request(
            "DELETE",
            "/api/admin/records/certificate/99",
            None,
            Some(&Admin::new()),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_settings_update() {
    let app = TestApp::new();
    app.seed(ModelType::Settings, 1).await;
    let admin = Admin::new();

    let response = app
        .request(
            "PUT",
            "/api/admin/settings",
            Some(json!({ "maintenance_mode": false })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "updated");

    let shown = app
        .request("GET", "/api/admin/settings", None, Some(&admin))
        .await;
    assert_eq!(shown.body["data"]["record"]["maintenance_mode"], "0");
    assert_eq!(shown.body["data"]["id"], serde_json::Value::Null);
    assert!(shown.body["data"]["undo"].is_object());
}
