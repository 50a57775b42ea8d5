//! Media item repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use manara_core::error::{AppError, ErrorKind};
use manara_core::result::AppResult;
use manara_core::traits::SnapshotRepository;
use manara_core::types::{ModelType, Snapshot};
use manara_entity::record::{FromSnapshot, MediaFields, MediaItem, Trackable};

use super::{require_id, snapshot_id};

/// Repository for media library metadata.
#[derive(Debug, Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    /// Create a new media repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a media item by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<MediaItem>> {
        sqlx::query_as::<_, MediaItem>("SELECT * FROM media_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find media", e))
    }

    /// Overwrite the trackable columns of a media item.
    pub async fn update(&self, id: i64, f: &MediaFields) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE media_items SET title_en = $2, title_ar = $3, alt_en = $4, alt_ar = $5, \
             file_path = $6, mime_type = $7, collection = $8, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(&f.title_en)
        .bind(&f.title_ar)
        .bind(&f.alt_en)
        .bind(&f.alt_ar)
        .bind(&f.file_path)
        .bind(&f.mime_type)
        .bind(&f.collection)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update media", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a metadata row with an explicit id. The stored file is not checked.
    pub async fn insert_with_id(&self, id: i64, f: &MediaFields) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO media_items (id, title_en, title_ar, alt_en, alt_ar, file_path, mime_type, \
             collection) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
        )
        .bind(id)
        .bind(&f.title_en)
        .bind(&f.title_ar)
        .bind(&f.alt_en)
        .bind(&f.alt_ar)
        .bind(&f.file_path)
        .bind(&f.mime_type)
        .bind(&f.collection)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to re-create media", e))
    }

    /// Delete a media item's metadata row.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM media_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete media", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SnapshotRepository for MediaRepository {
    fn model_type(&self) -> ModelType {
        ModelType::Media
    }

    async fn load_snapshot(&self, id: Option<i64>) -> AppResult<Option<Snapshot>> {
        let id = require_id(id, ModelType::Media)?;
        Ok(self.find_by_id(id).await?.map(|m| m.snapshot()))
    }

    async fn exists(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::Media)?;
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM media_items WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check media", e))
    }

    async fn update_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<bool> {
        let id = snapshot_id(snapshot, ModelType::Media)?;
        self.update(id, &MediaFields::from_snapshot(snapshot)?).await
    }

    async fn insert_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<Option<i64>> {
        let id = snapshot_id(snapshot, ModelType::Media)?;
        let fields = MediaFields::from_snapshot(snapshot)?;
        Ok(Some(self.insert_with_id(id, &fields).await?))
    }

    async fn delete(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::Media)?;
        MediaRepository::delete(self, id).await
    }
}
