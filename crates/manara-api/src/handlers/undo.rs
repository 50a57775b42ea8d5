//! One-click undo handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::dto::request::RecordQuery;
use crate::error::ApiError;
use crate::extractors::AdminSession;
use crate::extractors::path::parse_model_type;
use crate::state::AppState;

/// GET /api/admin/undo/{model_type}?id=
///
/// Returns the undo metadata for the record, or `null` when the session
/// has nothing to undo for it.
pub async fn undo_status(
    State(state): State<AppState>,
    session: AdminSession,
    Path(model_type): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let model_type = parse_model_type(&model_type)?;
    let meta = state
        .undo_service
        .get_undo_meta(&session, model_type, query.id)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": meta })))
}

/// POST /api/admin/undo/{model_type}/restore?id=
pub async fn undo_restore(
    State(state): State<AppState>,
    session: AdminSession,
    Path(model_type): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let model_type = parse_model_type(&model_type)?;
    let outcome = state
        .undo_service
        .undo_last(&session, model_type, query.id)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": outcome })))
}

/// DELETE /api/admin/undo/{model_type}?id=
pub async fn undo_clear(
    State(state): State<AppState>,
    session: AdminSession,
    Path(model_type): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let model_type = parse_model_type(&model_type)?;
    state
        .undo_service
        .clear(&session, model_type, query.id)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": null })))
}

/// DELETE /api/admin/undo
pub async fn undo_clear_all(
    State(state): State<AppState>,
    session: AdminSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cleared = state.undo_service.clear_all(&session).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "cleared": cleared } }),
    ))
}
