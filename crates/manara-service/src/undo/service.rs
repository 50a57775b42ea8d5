//! Undo orchestration: capture on mutation, restore on demand.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use manara_core::error::AppError;
use manara_core::result::AppResult;
use manara_core::types::model_type::{ID_FIELD, field_label};
use manara_core::types::{ModelType, Snapshot};
use manara_entity::change_log::{ChangeAction, ChangeLogEntry, CreateChangeLogEntry};

use super::compare::{FieldDiff, compare};
use super::registry::RestoreRegistry;
use super::slots::{SlotStore, UndoMeta};
use super::store::ChangeLogStore;
use crate::context::RequestContext;

/// Labels listed in a slot summary before collapsing into "and N more".
const SUMMARY_FIELDS: usize = 3;

/// What a tracked mutation recorded before the primary write.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    /// Whether anything changed. Always `true` for deletes.
    pub changed: bool,
    /// Field differences (empty for deletes).
    pub diff: Vec<FieldDiff>,
    /// Change-log entry written, if logging succeeded.
    pub log_id: Option<Uuid>,
    /// Undo slot metadata written, if any.
    pub meta: Option<UndoMeta>,
}

/// Result of a one-click undo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoOutcome {
    pub model_type: ModelType,
    pub model_id: Option<i64>,
    /// The change-log entry that was reverted.
    pub log_id: Uuid,
    /// Admin URL showing the restored record.
    pub redirect_url: String,
}

/// Captures before/after state of admin mutations and restores it.
#[derive(Debug, Clone)]
pub struct UndoService {
    registry: Arc<RestoreRegistry>,
    log: Arc<dyn ChangeLogStore>,
    slots: SlotStore,
    /// Abort the mutation when the change log cannot be written.
    strict_logging: bool,
}

impl UndoService {
    /// Creates a new undo service.
    pub fn new(
        registry: Arc<RestoreRegistry>,
        log: Arc<dyn ChangeLogStore>,
        slots: SlotStore,
        strict_logging: bool,
    ) -> Self {
        Self {
            registry,
            log,
            slots,
            strict_logging,
        }
    }

    /// The restore registry.
    pub fn registry(&self) -> &Arc<RestoreRegistry> {
        &self.registry
    }

    /// Compare `old` and `new`; when they differ, log the change and point
    /// the session slot for `model_type` at the record.
    ///
    /// Returns `false` without writing anything when nothing changed.
    pub async fn save_state(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
        old: &Snapshot,
        new: &Snapshot,
    ) -> AppResult<bool> {
        Ok(self
            .capture_update(ctx, model_type, model_id, old, new)
            .await?
            .changed)
    }

    /// [`save_state`](Self::save_state), returning what was recorded.
    pub async fn capture_update(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
        old: &Snapshot,
        new: &Snapshot,
    ) -> AppResult<Capture> {
        let comparison = compare(old, new, ID_FIELD);
        if !comparison.changed {
            return Ok(Capture::default());
        }

        let model_id = model_type.log_id(model_id);
        let entry = CreateChangeLogEntry {
            model_type,
            model_id,
            action: ChangeAction::Update,
            changed_by: ctx.user_id,
            old_data: old.clone(),
            new_data: Some(new.clone()),
        };
        let summary = update_summary(&comparison.diff);
        let (log_id, meta) = self
            .record(ctx, &entry, comparison.diff.len(), summary)
            .await?;

        info!(
            %model_type,
            model_id = ?model_id,
            fields = comparison.diff.len(),
            log_id = ?log_id,
            "Captured update"
        );

        Ok(Capture {
            changed: true,
            diff: comparison.diff,
            log_id,
            meta,
        })
    }

    /// Snapshot the full current record before it is deleted, log it, and
    /// point the session slot at it.
    ///
    /// Must complete before the delete is issued.
    pub async fn save_delete_state(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<()> {
        self.capture_delete(ctx, model_type, model_id).await?;
        Ok(())
    }

    /// [`save_delete_state`](Self::save_delete_state), returning what was recorded.
    pub async fn capture_delete(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<Capture> {
        let repo = self.registry.repository(model_type)?;
        let snapshot = repo.load_snapshot(model_id).await?.ok_or_else(|| {
            AppError::not_found(format!("{} not found", describe(model_type, model_id)))
        })?;

        let model_id = model_type.log_id(model_id);
        let field_count = snapshot.keys().filter(|k| *k != ID_FIELD).count();
        let entry = CreateChangeLogEntry {
            model_type,
            model_id,
            action: ChangeAction::Delete,
            changed_by: ctx.user_id,
            old_data: snapshot,
            new_data: None,
        };
        let summary = format!("Deleted {}", describe(model_type, model_id));
        let (log_id, meta) = self.record(ctx, &entry, field_count, summary).await?;

        info!(%model_type, model_id = ?model_id, log_id = ?log_id, "Captured delete");

        Ok(Capture {
            changed: true,
            diff: Vec::new(),
            log_id,
            meta,
        })
    }

    /// Undo metadata for the session slot, only if it points at `model_id`.
    pub async fn get_undo_meta(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<Option<UndoMeta>> {
        let slot = self.slots.get(ctx.session_id, model_type).await?;
        Ok(slot
            .filter(|s| s.model_id == model_type.log_id(model_id))
            .map(|s| s.meta))
    }

    /// `old_data` of the most recent non-reverted change-log entry for the record.
    pub async fn get_old_data(
        &self,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<Option<Snapshot>> {
        Ok(self
            .log
            .latest_active(model_type, model_type.log_id(model_id))
            .await?
            .map(|entry| entry.old_data.0))
    }

    /// Apply `snapshot` through the handler registered for `tag`.
    ///
    /// Returns `Ok(None)` when `tag` names no registered model type, and a
    /// `RestoreFailed` error when the handler yields a blank URL.
    pub async fn restore_from_snapshot(
        &self,
        tag: &str,
        snapshot: &Snapshot,
    ) -> AppResult<Option<String>> {
        let Some(model_type) = ModelType::parse(tag) else {
            warn!(tag, "Restore requested for unknown model type");
            return Ok(None);
        };
        let Some(handler) = self.registry.handler(model_type) else {
            warn!(%model_type, "No restore handler registered");
            return Ok(None);
        };

        let url = handler.restore(snapshot).await?;
        if url.trim().is_empty() {
            return Err(AppError::restore_failed(format!(
                "Restore of {} produced no landing page",
                model_type.label()
            )));
        }
        Ok(Some(url))
    }

    /// Clear the session slot for `model_type`, only if it points at `model_id`.
    pub async fn clear(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<()> {
        if let Some(slot) = self.slots.get(ctx.session_id, model_type).await? {
            if slot.model_id == model_type.log_id(model_id) {
                self.slots.clear(ctx.session_id, model_type).await?;
            }
        }
        Ok(())
    }

    /// Clear every undo slot of the session.
    pub async fn clear_all(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.slots.clear_all(ctx.session_id).await
    }

    /// One-click undo: restore the latest non-reverted change of a record,
    /// mark that entry reverted, and clear the slot.
    pub async fn undo_last(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<UndoOutcome> {
        let log_model_id = model_type.log_id(model_id);
        let entry = self
            .log
            .latest_active(model_type, log_model_id)
            .await?
            .ok_or_else(|| {
                AppError::nothing_to_restore(format!(
                    "No undo state available for {}",
                    describe(model_type, log_model_id)
                ))
            })?;

        let redirect_url = self
            .restore_from_snapshot(model_type.as_str(), &entry.old_data.0)
            .await?
            .ok_or_else(|| AppError::unknown_model_type(model_type.as_str()))?;

        if !self.log.mark_reverted(entry.id, ctx.user_id).await? {
            warn!(log_id = %entry.id, "Change log entry was reverted concurrently");
        }
        self.clear(ctx, model_type, model_id).await?;

        info!(%model_type, model_id = ?log_model_id, log_id = %entry.id, "Undo applied");
        Ok(UndoOutcome {
            model_type,
            model_id: log_model_id,
            log_id: entry.id,
            redirect_url,
        })
    }

    /// Roll back a capture whose primary write failed: remove its log
    /// entry and its slot so no phantom undo state remains.
    pub async fn discard(
        &self,
        ctx: &RequestContext,
        model_type: ModelType,
        model_id: Option<i64>,
        capture: &Capture,
    ) {
        if let Some(log_id) = capture.log_id {
            if let Err(e) = self.log.delete(log_id).await {
                warn!(%log_id, error = %e, "Failed to remove change log of failed mutation");
            }
        }
        if capture.meta.is_some() {
            if let Err(e) = self.clear(ctx, model_type, model_id).await {
                warn!(%model_type, error = %e, "Failed to clear undo slot of failed mutation");
            }
        }
    }

    /// Append a log entry and, if that worked, write the session slot.
    async fn record(
        &self,
        ctx: &RequestContext,
        entry: &CreateChangeLogEntry,
        field_count: usize,
        summary: String,
    ) -> AppResult<(Option<Uuid>, Option<UndoMeta>)> {
        let logged: ChangeLogEntry = match self.log.append(entry).await {
            Ok(logged) => logged,
            Err(e) if self.strict_logging => return Err(e),
            Err(e) => {
                warn!(
                    model_type = %entry.model_type,
                    model_id = ?entry.model_id,
                    error = %e,
                    "Change log write failed; undo unavailable for this change"
                );
                return Ok((None, None));
            }
        };

        let meta = UndoMeta {
            model_type: entry.model_type,
            model_id: entry.model_id,
            log_id: Some(logged.id),
            action: entry.action,
            field_count,
            summary,
            captured_at: Utc::now(),
        };
        match self.slots.put(ctx.session_id, meta.clone()).await {
            Ok(()) => Ok((Some(logged.id), Some(meta))),
            Err(e) => {
                warn!(session_id = %ctx.session_id, error = %e, "Failed to write undo slot");
                Ok((Some(logged.id), None))
            }
        }
    }
}

fn describe(model_type: ModelType, model_id: Option<i64>) -> String {
    match model_id {
        Some(id) => format!("{} #{id}", model_type.label()),
        None => model_type.label().to_string(),
    }
}

fn update_summary(diff: &[FieldDiff]) -> String {
    let labels: Vec<String> = diff
        .iter()
        .take(SUMMARY_FIELDS)
        .map(|d| field_label(&d.field))
        .collect();
    let mut summary = format!("Changed {}", labels.join(", "));
    if diff.len() > SUMMARY_FIELDS {
        summary.push_str(&format!(" and {} more", diff.len() - SUMMARY_FIELDS));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(field: &str) -> FieldDiff {
        FieldDiff {
            field: field.to_string(),
            old: String::new(),
            new: "x".to_string(),
        }
    }

    #[test]
    fn test_update_summary() {
        assert_eq!(update_summary(&[diff("name_en")]), "Changed Name (EN)");
        let many: Vec<_> = ["name_en", "name_ar", "slug", "category", "sort_order"]
            .into_iter()
            .map(diff)
            .collect();
        assert_eq!(
            update_summary(&many),
            "Changed Name (EN), Name (AR), Slug and 2 more"
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(ModelType::Product, Some(42)), "Product #42");
        assert_eq!(describe(ModelType::Settings, None), "Settings");
    }
}
