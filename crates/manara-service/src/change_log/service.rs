//! Change-log listing, detail, revert, and retention purge.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use manara_core::error::AppError;
use manara_core::result::AppResult;
use manara_core::types::PageResponse;
use manara_core::types::pagination::PageRequest;
use manara_entity::change_log::ChangeLogFilter;

use super::view::ChangeLogView;
use crate::context::RequestContext;
use crate::undo::{ChangeLogStore, UndoService};

/// Result of reverting a change-log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevertOutcome {
    pub entry_id: Uuid,
    pub model_type: String,
    pub model_id: Option<i64>,
    /// Admin URL showing the restored record.
    pub redirect_url: String,
}

/// Reads and reverts the durable change history.
#[derive(Debug, Clone)]
pub struct ChangeLogService {
    log: Arc<dyn ChangeLogStore>,
    undo: Arc<UndoService>,
    default_page_size: u64,
}

impl ChangeLogService {
    /// Creates a new change-log service.
    pub fn new(log: Arc<dyn ChangeLogStore>, undo: Arc<UndoService>, default_page_size: u64) -> Self {
        Self {
            log,
            undo,
            default_page_size,
        }
    }

    /// Page size applied when a listing does not ask for one.
    pub fn default_page_size(&self) -> u64 {
        self.default_page_size
    }

    /// Filtered listing, newest first.
    pub async fn list(
        &self,
        filter: &ChangeLogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ChangeLogView>> {
        let entries = self.log.search(filter, page).await?;
        Ok(entries.map(ChangeLogView::from))
    }

    /// A single entry with its derived field changes.
    pub async fn get(&self, id: Uuid) -> AppResult<ChangeLogView> {
        self.log
            .find(id)
            .await?
            .map(ChangeLogView::from)
            .ok_or_else(|| AppError::not_found(format!("Change log entry {id} not found")))
    }

    /// Mark an entry reverted and restore its old snapshot.
    ///
    /// An entry can be reverted once. The mark is claimed before the record
    /// is written, so a request that loses a concurrent revert returns
    /// `Conflict` without touching the record. If the restore then fails the
    /// claim is released and the entry stays active. The acting session's
    /// undo slot for the same record is cleared afterwards.
    pub async fn revert(&self, ctx: &RequestContext, id: Uuid) -> AppResult<RevertOutcome> {
        let entry = self
            .log
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Change log entry {id} not found")))?;

        if entry.is_reverted() {
            return Err(AppError::conflict("Change log entry already reverted"));
        }
        if !self.log.mark_reverted(entry.id, ctx.user_id).await? {
            warn!(log_id = %entry.id, "Change log entry reverted concurrently");
            return Err(AppError::conflict("Change log entry already reverted"));
        }

        let restored = self
            .undo
            .restore_from_snapshot(&entry.model_type, &entry.old_data.0)
            .await
            .and_then(|url| url.ok_or_else(|| AppError::unknown_model_type(&entry.model_type)));
        let redirect_url = match restored {
            Ok(url) => url,
            Err(e) => {
                if let Err(release) = self.log.release_revert(entry.id, ctx.user_id).await {
                    warn!(log_id = %entry.id, error = %release, "Failed to release revert mark");
                }
                return Err(e);
            }
        };

        if let Some(model_type) = entry.kind() {
            self.undo.clear(ctx, model_type, entry.model_id).await?;
        }

        info!(
            log_id = %entry.id,
            model_type = %entry.model_type,
            model_id = ?entry.model_id,
            reverted_by = ?ctx.user_id,
            "Change reverted"
        );

        Ok(RevertOutcome {
            entry_id: entry.id,
            model_type: entry.model_type,
            model_id: entry.model_id,
            redirect_url,
        })
    }

    /// Permanently remove an entry, whatever its revert state.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.log.delete(id).await? {
            return Err(AppError::not_found(format!("Change log entry {id} not found")));
        }
        info!(log_id = %id, "Change log entry deleted");
        Ok(())
    }

    /// Remove entries older than `days` days. Returns the number removed.
    pub async fn purge_older_than(&self, days: u32) -> AppResult<u64> {
        if days == 0 {
            return Err(AppError::validation("Retention must be at least one day"));
        }
        let cutoff = Utc::now() - Duration::days(i64::from(days));
        let removed = self.log.purge_before(cutoff).await?;
        info!(days, %cutoff, removed, "Change log purged");
        Ok(removed)
    }
}
