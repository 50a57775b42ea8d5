//! Job application repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use manara_core::error::{AppError, ErrorKind};
use manara_core::result::AppResult;
use manara_core::traits::SnapshotRepository;
use manara_core::types::{ModelType, Snapshot};
use manara_entity::record::{FromSnapshot, JobApplication, JobApplicationFields, Trackable};

use super::{require_id, snapshot_id};

/// Repository for job applications.
#[derive(Debug, Clone)]
pub struct JobApplicationRepository {
    pool: PgPool,
}

impl JobApplicationRepository {
    /// Create a new job application repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an application by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<JobApplication>> {
        sqlx::query_as::<_, JobApplication>("SELECT * FROM job_applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find job application", e)
            })
    }

    /// Overwrite the trackable columns of an application.
    pub async fn update(&self, id: i64, f: &JobApplicationFields) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE job_applications SET career_id = $2, applicant_name = $3, email = $4, \
             phone = $5, status = $6, notes = $7, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(f.career_id)
        .bind(&f.applicant_name)
        .bind(&f.email)
        .bind(&f.phone)
        .bind(&f.status)
        .bind(&f.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update job application", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert an application with an explicit id.
    ///
    /// A `career_id` pointing at a listing that no longer exists is stored
    /// as `NULL`.
    pub async fn insert_with_id(&self, id: i64, f: &JobApplicationFields) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO job_applications (id, career_id, applicant_name, email, phone, status, notes) \
             VALUES ($1, (SELECT id FROM careers WHERE id = $2), $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(id)
        .bind(f.career_id)
        .bind(&f.applicant_name)
        .bind(&f.email)
        .bind(&f.phone)
        .bind(&f.status)
        .bind(&f.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to re-create job application", e)
        })
    }

    /// Delete an application.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete job application", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SnapshotRepository for JobApplicationRepository {
    fn model_type(&self) -> ModelType {
        ModelType::Application
    }

    async fn load_snapshot(&self, id: Option<i64>) -> AppResult<Option<Snapshot>> {
        let id = require_id(id, ModelType::Application)?;
        Ok(self.find_by_id(id).await?.map(|a| a.snapshot()))
    }

    async fn exists(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::Application)?;
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM job_applications WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check job application", e)
        })
    }

    async fn update_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<bool> {
        let id = snapshot_id(snapshot, ModelType::Application)?;
        self.update(id, &JobApplicationFields::from_snapshot(snapshot)?)
            .await
    }

    async fn insert_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<Option<i64>> {
        let id = snapshot_id(snapshot, ModelType::Application)?;
        let fields = JobApplicationFields::from_snapshot(snapshot)?;
        Ok(Some(self.insert_with_id(id, &fields).await?))
    }

    async fn delete(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::Application)?;
        JobApplicationRepository::delete(self, id).await
    }
}
