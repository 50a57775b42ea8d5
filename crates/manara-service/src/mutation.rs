//! Tracked admin mutations: every update and delete goes through the undo
//! capture before the primary write.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use manara_core::error::AppError;
use manara_core::result::AppResult;
use manara_core::types::model_type::ID_FIELD;
use manara_core::types::{ModelType, Snapshot};

use crate::context::RequestContext;
use crate::undo::service::Capture;
use crate::undo::{FieldDiff, UndoMeta, UndoService};

/// Result of a tracked mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MutationOutcome {
    /// The submitted values matched the stored record; nothing was written.
    NoChanges,
    /// The record was updated.
    Updated {
        changes: Vec<FieldDiff>,
        /// `None` when the change could not be logged.
        undo: Option<UndoMeta>,
    },
    /// The record was deleted.
    Deleted { undo: Option<UndoMeta> },
}

/// Runs admin updates and deletes with change capture.
#[derive(Debug, Clone)]
pub struct TrackedMutationService {
    undo: Arc<UndoService>,
}

impl TrackedMutationService {
    /// Creates a new tracked mutation service.
    pub fn new(undo: Arc<UndoService>) -> Self {
        Self { undo }
    }

    /// Current snapshot of a record.
    pub async fn show(&self, model_type: ModelType, model_id: Option<i64>) -> AppResult<Snapshot> {
        self.undo
            .registry()
            .repository(model_type)?
            .load_snapshot(model_id)
            .await?
            .ok_or_else(|| not_found(model_type, model_id))
    }

    /// Apply submitted values to the trackable fields of a record.
    ///
    /// Fields that are not trackable for `model_type` are rejected. A
    /// submitted `id` is ignored. Submitted text is normalised to each
    /// field's kind first, so `"true"` for a stored `"1"` is no change.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
        submitted: &Snapshot,
    ) -> AppResult<MutationOutcome> {
        let repo = self.undo.registry().repository(model_type)?.clone();
        let current = repo
            .load_snapshot(model_id)
            .await?
            .ok_or_else(|| not_found(model_type, model_id))?;
        let updated = overlay(model_type, &current, submitted)?;

        let capture = self
            .undo
            .capture_update(ctx, model_type, model_id, &current, &updated)
            .await?;
        if !capture.changed {
            return Ok(MutationOutcome::NoChanges);
        }

        match repo.update_from_snapshot(&updated).await {
            Ok(true) => {}
            Ok(false) => {
                self.compensate(ctx, model_type, model_id, &capture).await;
                return Err(not_found(model_type, model_id));
            }
            Err(e) => {
                self.compensate(ctx, model_type, model_id, &capture).await;
                return Err(e);
            }
        }

        info!(%model_type, model_id = ?model_id, fields = capture.diff.len(), "Record updated");
        Ok(MutationOutcome::Updated {
            changes: capture.diff,
            undo: capture.meta,
        })
    }

    /// Delete a record after capturing its full state.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<MutationOutcome> {
        if model_type.is_singleton() {
            return Err(AppError::validation(format!(
                "{} cannot be deleted",
                model_type.label()
            )));
        }
        let repo = self.undo.registry().repository(model_type)?.clone();

        let capture = self.undo.capture_delete(ctx, model_type, model_id).await?;

        match repo.delete(model_id).await {
            Ok(true) => {}
            Ok(false) => {
                self.compensate(ctx, model_type, model_id, &capture).await;
                return Err(not_found(model_type, model_id));
            }
            Err(e) => {
                self.compensate(ctx, model_type, model_id, &capture).await;
                return Err(e);
            }
        }

        info!(%model_type, model_id = ?model_id, "Record deleted");
        Ok(MutationOutcome::Deleted { undo: capture.meta })
    }

    async fn compensate(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
        capture: &Capture,
    ) {
        warn!(%model_type, model_id = ?model_id, "Primary write failed; discarding captured change");
        self.undo.discard(ctx, model_type, model_id, capture).await;
    }
}

/// `current` with the trackable fields of `submitted`, normalised to their
/// kinds, written over it.
fn overlay(model_type: ModelType, current: &Snapshot, submitted: &Snapshot) -> AppResult<Snapshot> {
    let tracked = model_type.tracked_fields();
    let unknown: Vec<&str> = submitted
        .keys()
        .filter(|f| *f != ID_FIELD && !tracked.contains(f))
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::validation(format!(
            "Unknown fields for {model_type}: {}",
            unknown.join(", ")
        )));
    }

    let submitted = submitted.normalized_for(model_type)?;
    let mut updated = current.clone();
    for (field, value) in submitted.iter().filter(|(f, _)| *f != ID_FIELD) {
        updated.set(field, value);
    }
    Ok(updated)
}

fn not_found(model_type: ModelType, model_id: Option<i64>) -> AppError {
    match model_id {
        Some(id) if !model_type.is_singleton() => {
            AppError::not_found(format!("{} #{id} not found", model_type.label()))
        }
        _ => AppError::not_found(format!("{} not found", model_type.label())),
    }
}
