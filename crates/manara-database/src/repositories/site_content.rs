//! Site content repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use manara_core::error::{AppError, ErrorKind};
use manara_core::result::AppResult;
use manara_core::traits::SnapshotRepository;
use manara_core::types::{ModelType, Snapshot};
use manara_entity::record::{FromSnapshot, SiteContent, SiteContentFields, Trackable};

use super::{require_id, snapshot_id};

/// Repository for editable copy blocks.
#[derive(Debug, Clone)]
pub struct SiteContentRepository {
    pool: PgPool,
}

impl SiteContentRepository {
    /// Create a new site content repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a block by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<SiteContent>> {
        sqlx::query_as::<_, SiteContent>("SELECT * FROM site_contents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find site content", e)
            })
    }

    /// Overwrite the trackable columns of a block.
    pub async fn update(&self, id: i64, f: &SiteContentFields) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE site_contents SET page = $2, section = $3, content_key = $4, content_en = $5, \
             content_ar = $6, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(&f.page)
        .bind(&f.section)
        .bind(&f.content_key)
        .bind(&f.content_en)
        .bind(&f.content_ar)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update site content", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a block with an explicit id.
    pub async fn insert_with_id(&self, id: i64, f: &SiteContentFields) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO site_contents (id, page, section, content_key, content_en, content_ar) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(id)
        .bind(&f.page)
        .bind(&f.section)
        .bind(&f.content_key)
        .bind(&f.content_en)
        .bind(&f.content_ar)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to re-create site content", e)
        })
    }

    /// Delete a block.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM site_contents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete site content", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SnapshotRepository for SiteContentRepository {
    fn model_type(&self) -> ModelType {
        ModelType::SiteContent
    }

    async fn load_snapshot(&self, id: Option<i64>) -> AppResult<Option<Snapshot>> {
        let id = require_id(id, ModelType::SiteContent)?;
        Ok(self.find_by_id(id).await?.map(|c| c.snapshot()))
    }

    async fn exists(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::SiteContent)?;
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM site_contents WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check site content", e)
            })
    }

    async fn update_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<bool> {
        let id = snapshot_id(snapshot, ModelType::SiteContent)?;
        self.update(id, &SiteContentFields::from_snapshot(snapshot)?)
            .await
    }

    async fn insert_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<Option<i64>> {
        let id = snapshot_id(snapshot, ModelType::SiteContent)?;
        let fields = SiteContentFields::from_snapshot(snapshot)?;
        Ok(Some(self.insert_with_id(id, &fields).await?))
    }

    async fn delete(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::SiteContent)?;
        SiteContentRepository::delete(self, id).await
    }
}
