//! HTTP tests for the change-log endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{Admin, TestApp};
use manara_core::types::ModelType;

async fn change_product(app: &TestApp, admin: &Admin, id: i64, slug: &str) {
    let response = app
        .request(
            "PUT",
            &format!("/api/admin/records/product/{id}"),
            Some(json!({ "slug": slug })),
            Some(admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_and_filter() {
    let app = TestApp::new();
    app.seed(ModelType::Product, 1).await;
    app.seed(ModelType::Product, 2).await;
    let alice = Admin::new();
    let bob = Admin::new();
    change_product(&app, &alice, 1, "a").await;
    change_product(&app, &bob, 2, "b").await;

    let all = app
        .request("GET", "/api/admin/change-logs", None, Some(&alice))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"]["total_items"], 2);
    assert_eq!(all.body["data"]["items"][0]["model_id"], 2);

    let by_alice = app
        .request(
            "GET",
            &format!(
                "/api/admin/change-logs?user_id={}&period=today&per_page=10",
                alice.user_id
            ),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(by_alice.body["data"]["total_items"], 1);
    assert_eq!(by_alice.body["data"]["page_size"], 10);
    assert_eq!(by_alice.body["data"]["items"][0]["changes"][0]["label"], "Slug");
}

#[tokio::test]
async fn test_revert_twice_conflicts() {
    let app = TestApp::new();
    app.seed(ModelType::Product, 1).await;
    let admin = Admin::new();
    change_product(&app, &admin, 1, "changed").await;
    let id = app.services.log.entries().await[0].id;

    let first = app
        .request(
            "POST",
            &format!("/api/admin/change-logs/{id}/revert"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["redirect_url"], "/admin/products/1/edit");

    let second = app
        .request(
            "POST",
            &format!("/api/admin/change-logs/{id}/revert"),
            None,
            Some(&Admin::new()),
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");

    let detail = app
        .request(
            "GET",
            &format!("/api/admin/change-logs/{id}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(detail.body["data"]["status"], "reverted");
    assert_eq!(detail.body["data"]["reverted_by"], admin.user_id.to_string());

    let reverted = app
        .request(
            "GET",
            "/api/admin/change-logs?state=reverted",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(reverted.body["data"]["total_items"], 1);
}

#[tokio::test]
async fn test_delete_entry() {
    let app = TestApp::new();
    app.seed(ModelType::Product, 1).await;
    let admin = Admin::new();
    change_product(&app, &admin, 1, "changed").await;
    let id = app.services.log.entries().await[0].id;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/admin/change-logs/{id}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let missing = app
        .request(
            "GET",
            &format!("/api/admin/change-logs/{id}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_entry_id() {
    let app = TestApp::new();
    let response = app
        .request(
            "GET",
            "/api/admin/change-logs/not-a-uuid",
            None,
            Some(&Admin::new()),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["cache"], "memory");
    assert_eq!(response.body["data"]["status"], "ok");
}
