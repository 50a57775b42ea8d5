//! Shared test helpers for the HTTP tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use manara_api::{AppState, build_app};
use manara_cache::provider::CacheManager;
use manara_core::config::AppConfig;
use manara_core::types::ModelType;
use manara_service::testing::{TestServices, sample_snapshot};

/// Identity headers of one admin browser session.
#[derive(Debug, Clone, Copy)]
pub struct Admin {
    pub user_id: Uuid,
    pub session_id: Uuid,
}

impl Admin {
    pub fn new() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
        }
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory storage behind the services
    pub services: TestServices,
    /// Application config
    pub config: AppConfig,
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::with_services(TestServices::new())
    }

    /// Create a test application on top of custom services
    pub fn with_services(services: TestServices) -> Self {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "database": { "url": "postgres://localhost/manara_test" }
        }))
        .expect("test config");

        let state = AppState {
            config: Arc::new(config.clone()),
            cache: Arc::new(CacheManager::from_provider(services.cache.clone())),
            undo_service: services.undo.clone(),
            change_log_service: services.change_logs.clone(),
            mutation_service: services.mutations.clone(),
        };

        Self {
            router: build_app(state),
            services,
            config,
        }
    }

    /// Seed a record with placeholder values.
    pub async fn seed(&self, model_type: ModelType, id: i64) {
        self.services
            .repo(model_type)
            .seed(sample_snapshot(model_type, id))
            .await
            .expect("seed record");
    }

    /// Send a request as `admin` (or anonymously) and decode the JSON body.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        admin: Option<&Admin>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(admin) = admin {
            builder = builder
                .header("x-user-id", admin.user_id.to_string())
                .header("x-session-id", admin.session_id.to_string());
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
