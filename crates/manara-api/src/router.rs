//! Route definitions for the Manara admin API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes, without outer middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(record_routes())
        .merge(undo_routes())
        .merge(change_log_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Tracked record endpoints
fn record_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/records/{model_type}/{id}",
            get(handlers::records::show_record)
                .put(handlers::records::update_record)
                .delete(handlers::records::delete_record),
        )
        .route(
            "/admin/settings",
            get(handlers::records::show_settings).put(handlers::records::update_settings),
        )
}

/// One-click undo endpoints
fn undo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/undo",
            delete(handlers::undo::undo_clear_all),
        )
        .route(
            "/admin/undo/{model_type}",
            get(handlers::undo::undo_status).delete(handlers::undo::undo_clear),
        )
        .route(
            "/admin/undo/{model_type}/restore",
            post(handlers::undo::undo_restore),
        )
}

/// Change-log screens
fn change_log_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/change-logs",
            get(handlers::change_logs::list_change_logs),
        )
        .route(
            "/admin/change-logs/{id}",
            get(handlers::change_logs::get_change_log)
                .delete(handlers::change_logs::delete_change_log),
        )
        .route(
            "/admin/change-logs/{id}/revert",
            post(handlers::change_logs::revert_change_log),
        )
}

/// Health endpoints (no admin session)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
