//! Career (job listing) repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use manara_core::error::{AppError, ErrorKind};
use manara_core::result::AppResult;
use manara_core::traits::SnapshotRepository;
use manara_core::types::{ModelType, Snapshot};
use manara_entity::record::{Career, CareerFields, FromSnapshot, Trackable};

use super::{require_id, snapshot_id};

/// Repository for job listings.
#[derive(Debug, Clone)]
pub struct CareerRepository {
    pool: PgPool,
}

impl CareerRepository {
    /// Create a new career repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a listing by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Career>> {
        sqlx::query_as::<_, Career>("SELECT * FROM careers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find career", e))
    }

    /// Overwrite the trackable columns of a listing.
    pub async fn update(&self, id: i64, f: &CareerFields) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE careers SET title_en = $2, title_ar = $3, description_en = $4, \
             description_ar = $5, location = $6, employment_type = $7, status = $8, \
             closes_on = $9, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(&f.title_en)
        .bind(&f.title_ar)
        .bind(&f.description_en)
        .bind(&f.description_ar)
        .bind(&f.location)
        .bind(&f.employment_type)
        .bind(&f.status)
        .bind(f.closes_on)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update career", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a listing with an explicit id.
    ///
    /// Applications detached when the listing was deleted stay detached.
    pub async fn insert_with_id(&self, id: i64, f: &CareerFields) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO careers (id, title_en, title_ar, description_en, description_ar, location, \
             employment_type, status, closes_on) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(id)
        .bind(&f.title_en)
        .bind(&f.title_ar)
        .bind(&f.description_en)
        .bind(&f.description_ar)
        .bind(&f.location)
        .bind(&f.employment_type)
        .bind(&f.status)
        .bind(f.closes_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to re-create career", e))
    }

    /// Delete a listing.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM careers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete career", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SnapshotRepository for CareerRepository {
    fn model_type(&self) -> ModelType {
        ModelType::Career
    }

    async fn load_snapshot(&self, id: Option<i64>) -> AppResult<Option<Snapshot>> {
        let id = require_id(id, ModelType::Career)?;
        Ok(self.find_by_id(id).await?.map(|c| c.snapshot()))
    }

    async fn exists(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::Career)?;
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM careers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check career", e))
    }

    async fn update_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<bool> {
        let id = snapshot_id(snapshot, ModelType::Career)?;
        self.update(id, &CareerFields::from_snapshot(snapshot)?).await
    }

    async fn insert_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<Option<i64>> {
        let id = snapshot_id(snapshot, ModelType::Career)?;
        let fields = CareerFields::from_snapshot(snapshot)?;
        Ok(Some(self.insert_with_id(id, &fields).await?))
    }

    async fn delete(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::Career)?;
        CareerRepository::delete(self, id).await
    }
}
