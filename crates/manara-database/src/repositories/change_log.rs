//! Change-log repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::debug;
use uuid::Uuid;

use manara_core::error::{AppError, ErrorKind};
use manara_core::result::AppResult;
use manara_core::types::ModelType;
use manara_core::types::pagination::{PageRequest, PageResponse};
use manara_entity::change_log::{
    ChangeLogEntry, ChangeLogFilter, ChangeState, CreateChangeLogEntry,
};

/// Repository for the append-only change log.
#[derive(Debug, Clone)]
pub struct ChangeLogRepository {
    pool: PgPool,
}

impl ChangeLogRepository {
    /// Create a new change-log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an entry. `id` and `created_at` are assigned by the database.
    pub async fn append(&self, data: &CreateChangeLogEntry) -> AppResult<ChangeLogEntry> {
        sqlx::query_as::<_, ChangeLogEntry>(
            "INSERT INTO change_logs (model_type, model_id, action, changed_by, old_data, new_data) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.model_type.as_str())
        .bind(data.model_id)
        .bind(data.action)
        .bind(data.changed_by)
        .bind(Json(&data.old_data))
        .bind(data.new_data.as_ref().map(Json))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append change log", e))
    }

    /// Find an entry by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ChangeLogEntry>> {
        sqlx::query_as::<_, ChangeLogEntry>("SELECT * FROM change_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find change log entry", e)
            })
    }

    /// Most recent non-reverted entry for a record.
    ///
    /// `model_id` is matched with `IS NOT DISTINCT FROM`, so `None` finds
    /// singleton entries.
    pub async fn find_latest_active(
        &self,
        model_type: ModelType,
        model_id: Option<i64>,
    ) -> AppResult<Option<ChangeLogEntry>> {
        sqlx::query_as::<_, ChangeLogEntry>(
            "SELECT * FROM change_logs \
             WHERE model_type = $1 AND model_id IS NOT DISTINCT FROM $2 AND reverted_at IS NULL \
             ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .bind(model_type.as_str())
        .bind(model_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find latest change log", e)
        })
    }

    /// Search entries with filters, newest first.
    pub async fn search(
        &self,
        filter: &ChangeLogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ChangeLogEntry>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if filter.model_type.is_some() {
            conditions.push(format!("model_type = ${param_idx}"));
            param_idx += 1;
        }
        if filter.model_id.is_some() {
            conditions.push(format!("model_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.changed_by.is_some() {
            conditions.push(format!("changed_by = ${param_idx}"));
            param_idx += 1;
        }
        if filter.period.is_some() {
            conditions.push(format!("created_at >= ${param_idx}"));
            param_idx += 1;
        }
        match filter.state {
            Some(ChangeState::Active) => conditions.push("reverted_at IS NULL".to_string()),
            Some(ChangeState::Reverted) => conditions.push("reverted_at IS NOT NULL".to_string()),
            None => {}
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM change_logs {where_clause}");
        let select_sql = format!(
            "SELECT * FROM change_logs {where_clause} ORDER BY created_at DESC, id DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, ChangeLogEntry>(&select_sql);

        if let Some(t) = filter.model_type {
            count_query = count_query.bind(t.as_str());
            select_query = select_query.bind(t.as_str());
        }
        if let Some(id) = filter.model_id {
            count_query = count_query.bind(id);
            select_query = select_query.bind(id);
        }
        if let Some(uid) = filter.changed_by {
            count_query = count_query.bind(uid);
            select_query = select_query.bind(uid);
        }
        if let Some(period) = filter.period {
            let since = period.since(Utc::now());
            count_query = count_query.bind(since);
            select_query = select_query.bind(since);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count change log entries", e)
        })?;

        let entries = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search change log", e)
            })?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Mark an entry reverted.
    ///
    /// Compare-and-set on `reverted_at IS NULL`: returns `false` when the
    /// entry does not exist or was already reverted.
    pub async fn mark_reverted(&self, id: Uuid, reverted_by: Option<Uuid>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE change_logs SET reverted_at = NOW(), reverted_by = $2 \
             WHERE id = $1 AND reverted_at IS NULL",
        )
        .bind(id)
        .bind(reverted_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark change log reverted", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Undo [`mark_reverted`](Self::mark_reverted) after the restore it
    /// guarded failed. Only clears a mark set by `reverted_by`.
    pub async fn release_revert(&self, id: Uuid, reverted_by: Option<Uuid>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE change_logs SET reverted_at = NULL, reverted_by = NULL \
             WHERE id = $1 AND reverted_at IS NOT NULL AND reverted_by IS NOT DISTINCT FROM $2",
        )
        .bind(id)
        .bind(reverted_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to release change log revert", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an entry regardless of its revert state.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM change_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete change log entry", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every entry created before `cutoff`. Returns the number removed.
    pub async fn purge_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM change_logs WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge change log", e)
            })?;
        debug!(removed = result.rows_affected(), %cutoff, "Purged change log entries");
        Ok(result.rows_affected())
    }
}
