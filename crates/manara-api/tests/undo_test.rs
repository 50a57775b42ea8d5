//! HTTP tests for the one-click undo endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{Admin, TestApp};
use manara_core::types::ModelType;

#[tokio::test]
async fn test_delete_then_undo_recreates_record() {
    let app = TestApp::new();
    app.seed(ModelType::Career, 42).await;
    let admin = Admin::new();

    let deleted = app
        .request("DELETE", "/api/admin/records/career/42", None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["status"], "deleted");
    assert_eq!(deleted.body["data"]["undo"]["summary"], "Deleted Career #42");

    let status = app
        .request("GET", "/api/admin/undo/career?id=42", None, Some(&admin))
        .await;
    assert_eq!(status.body["data"]["action"], "delete");

    let restored = app
        .request(
            "POST",
            "/api/admin/undo/career/restore?id=42",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(restored.status, StatusCode::OK);
    assert_eq!(restored.body["data"]["redirect_url"], "/admin/careers/42/edit");

    let shown = app
        .request("GET", "/api/admin/records/career/42", None, Some(&admin))
        .await;
    assert_eq!(shown.status, StatusCode::OK);
    assert_eq!(shown.body["data"]["record"]["title_en"], "title_en 42");
    assert_eq!(shown.body["data"]["undo"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_restore_without_history_is_no_undo_state() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/admin/undo/product/restore?id=1",
            None,
            Some(&Admin::new()),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NO_UNDO_STATE");
}

#[tokio::test]
async fn test_undo_slot_is_per_session() {
    let app = TestApp::new();
    app.seed(ModelType::Product, 5).await;
    let alice = Admin::new();
    let bob = Admin::new();

    app.request(
        "PUT",
        "/api/admin/records/product/5",
        Some(json!({ "slug": "mesh" })),
        Some(&alice),
    )
    .await;

    let mine = app
        .request("GET", "/api/admin/undo/product?id=5", None, Some(&alice))
        .await;
    let theirs = app
        .request("GET", "/api/admin/undo/product?id=5", None, Some(&bob))
        .await;
    assert!(mine.body["data"].is_object());
    assert_eq!(theirs.body["data"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_clear_slot_only_for_matching_id() {
    let app = TestApp::new();
    app.seed(ModelType::Product, 5).await;
    let admin = Admin::new();
    app.request(
        "PUT",
        "/api/admin/records/product/5",
        Some(json!({ "slug": "mesh" })),
        Some(&admin),
    )
    .await;

    app.request("DELETE", "/api/admin/undo/product?id=6", None, Some(&admin))
        .await;
    let still = app
        .request("GET", "/api/admin/undo/product?id=5", None, Some(&admin))
        .await;
    assert!(still.body["data"].is_object());

    app.request("DELETE", "/api/admin/undo/product?id=5", None, Some(&admin))
        .await;
    let gone = app
        .request("GET", "/api/admin/undo/product?id=5", None, Some(&admin))
        .await;
    assert_eq!(gone.body["data"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_clear_all_slots() {
    let app = TestApp::new();
    app.seed(ModelType::Product, 5).await;
    app.seed(ModelType::Media, 5).await;
    let admin = Admin::new();
    for (path, body) in [
        ("/api/admin/records/product/5", json!({ "slug": "mesh" })),
        ("/api/admin/records/media/5", json!({ "title_en": "Hero" })),
    ] {
        app.request("PUT", path, Some(body), Some(&admin)).await;
    }

    let response = app
        .request("DELETE", "/api/admin/undo", None, Some(&admin))
        .await;
    assert_eq!(response.body["data"]["cleared"], 2);
}

#[tokio::test]
async fn test_undo_unknown_type() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/admin/undo/unknown_type/restore?id=1",
            None,
            Some(&Admin::new()),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "UNKNOWN_MODEL_TYPE");
}
