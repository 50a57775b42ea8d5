//! Tracked record handlers: show, update, delete, and the settings page.

use axum::Json;
use axum::extract::{Path, State};

use manara_core::types::{ModelType, Snapshot};

use crate::dto::response::{ApiResponse, RecordResponse};
use crate::error::ApiError;
use crate::extractors::AdminSession;
use crate::extractors::path::parse_model_type;
use crate::state::AppState;

/// GET /api/admin/records/{model_type}/{id}
pub async fn show_record(
    State(state): State<AppState>,
    session: AdminSession,
    Path((model_type, id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<RecordResponse>>, ApiError> {
    let model_type = parse_model_type(&model_type)?;
    Ok(Json(ApiResponse::ok(record(&state, &session, model_type, Some(id)).await?)))
}

/// PUT /api/admin/records/{model_type}/{id}
pub async fn update_record(
    State(state): State<AppState>,
    session: AdminSession,
    Path((model_type, id)): Path<(String, i64)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let model_type = parse_model_type(&model_type)?;
    let submitted = Snapshot::from_json(&body)?;

    let outcome = state
        .mutation_service
        .update(&session, model_type, Some(id), &submitted)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": outcome })))
}

/// DELETE /api/admin/records/{model_type}/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    session: AdminSession,
    Path((model_type, id)): Path<(String, i64)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let model_type = parse_model_type(&model_type)?;

    let outcome = state
        .mutation_service
        .delete(&session, model_type, Some(id))
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": outcome })))
}

/// GET /api/admin/settings
pub async fn show_settings(
    State(state): State<AppState>,
    session: AdminSession,
) -> Result<Json<ApiResponse<RecordResponse>>, ApiError> {
    Ok(Json(ApiResponse::ok(
        record(&state, &session, ModelType::Settings, None).await?,
    )))
}

/// PUT /api/admin/settings
pub async fn update_settings(
    State(state): State<AppState>,
    session: AdminSession,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let submitted = Snapshot::from_json(&body)?;

    let outcome = state
        .mutation_service
        .update(&session, ModelType::Settings, None, &submitted)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": outcome })))
}

async fn record(
    state: &AppState,
    session: &AdminSession,
    model_type: ModelType,
    id: Option<i64>,
) -> Result<RecordResponse, ApiError> {
    let record = state.mutation_service.show(model_type, id).await?;
    let undo = state
        .undo_service
        .get_undo_meta(session, model_type, id)
        .await?;

    Ok(RecordResponse {
        model_type: model_type.as_str().to_string(),
        id: model_type.log_id(id),
        record,
        undo,
    })
}
