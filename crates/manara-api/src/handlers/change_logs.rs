//! Change-log handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::dto::request::ChangeLogQuery;
use crate::error::ApiError;
use crate::extractors::path::parse_uuid;
use crate::extractors::{AdminSession, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/change-logs
pub async fn list_change_logs(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(params): Query<PaginationParams>,
    Query(query): Query<ChangeLogQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filter = query.into_filter()?;
    let page = params.into_page_request(state.change_log_service.default_page_size());

    let result = state.change_log_service.list(&filter, &page).await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/admin/change-logs/{id}
pub async fn get_change_log(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entry = state.change_log_service.get(parse_uuid(&id)?).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": entry })))
}

/// POST /api/admin/change-logs/{id}/revert
pub async fn revert_change_log(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let outcome = state
        .change_log_service
        .revert(&session, parse_uuid(&id)?)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": outcome })))
}

/// DELETE /api/admin/change-logs/{id}
pub async fn delete_change_log(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.change_log_service.delete(parse_uuid(&id)?).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Change log entry deleted" } }),
    ))
}
