//! Durable change-log storage seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use manara_core::result::AppResult;
use manara_core::types::ModelType;
use manara_core::types::pagination::{PageRequest, PageResponse};
use manara_database::repositories::ChangeLogRepository;
use manara_entity::change_log::{ChangeLogEntry, ChangeLogFilter, CreateChangeLogEntry};

/// Append-only change-log operations used by the undo and change-log services.
#[async_trait]
pub trait ChangeLogStore: Send + Sync + 'static {
    /// Durably insert an entry.
    async fn append(&self, entry: &CreateChangeLogEntry) -> AppResult<ChangeLogEntry>;

    /// Find an entry by id.
    async fn find(&self, id: Uuid) -> AppResult<Option<ChangeLogEntry>>;

    /// Most recent non-reverted entry for a record.
    async fn latest_active(
        &self,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<Option<ChangeLogEntry>>;

    /// Filtered listing, newest first.
    async fn search(
        &self,
        filter: &ChangeLogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ChangeLogEntry>>;

    /// Set `reverted_at`/`reverted_by` if not already set. Returns whether
    /// this call performed the transition.
    async fn mark_reverted(&self, id: Uuid, reverted_by: Option<Uuid>) -> AppResult<bool>;

    /// Clear a revert mark set by `reverted_by` whose restore failed.
    async fn release_revert(&self, id: Uuid, reverted_by: Option<Uuid>) -> AppResult<bool>;

    /// Remove an entry. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Remove entries created before `cutoff`.
    async fn purge_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

impl std::fmt::Debug for dyn ChangeLogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangeLogStore")
    }
}

#[async_trait]
impl ChangeLogStore for ChangeLogRepository {
    async fn append(&self, entry: &CreateChangeLogEntry) -> AppResult<ChangeLogEntry> {
        ChangeLogRepository::append(self, entry).await
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<ChangeLogEntry>> {
        self.find_by_id(id).await
    }

    async fn latest_active(
        &self,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<Option<ChangeLogEntry>> {
        self.find_latest_active(model_type, model_id).await
    }

    async fn search(
        &self,
        filter: &ChangeLogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ChangeLogEntry>> {
        ChangeLogRepository::search(self, filter, page).await
    }

    async fn mark_reverted(&self, id: Uuid, reverted_by: Option<Uuid>) -> AppResult<bool> {
        ChangeLogRepository::mark_reverted(self, id, reverted_by).await
    }

    async fn release_revert(&self, id: Uuid, reverted_by: Option<Uuid>) -> AppResult<bool> {
        ChangeLogRepository::release_revert(self, id, reverted_by).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        ChangeLogRepository::delete(self, id).await
    }

    async fn purge_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        ChangeLogRepository::purge_before(self, cutoff).await
    }
}
