//! Certificate repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use manara_core::error::{AppError, ErrorKind};
use manara_core::result::AppResult;
use manara_core::traits::SnapshotRepository;
use manara_core::types::{ModelType, Snapshot};
use manara_entity::record::{Certificate, CertificateFields, FromSnapshot, Trackable};

use super::{require_id, snapshot_id};

/// Repository for certificates.
#[derive(Debug, Clone)]
pub struct CertificateRepository {
    pool: PgPool,
}

impl CertificateRepository {
    /// Create a new certificate repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a certificate by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Certificate>> {
        sqlx::query_as::<_, Certificate>("SELECT * FROM certificates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find certificate", e)
            })
    }

    /// Overwrite the trackable columns of a certificate.
    pub async fn update(&self, id: i64, f: &CertificateFields) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE certificates SET title_en = $2, title_ar = $3, issuer = $4, issued_on = $5, \
             expires_on = $6, is_active = $7, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(&f.title_en)
        .bind(&f.title_ar)
        .bind(&f.issuer)
        .bind(f.issued_on)
        .bind(f.expires_on)
        .bind(f.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update certificate", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a certificate with an explicit id.
    pub async fn insert_with_id(&self, id: i64, f: &CertificateFields) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO certificates (id, title_en, title_ar, issuer, issued_on, expires_on, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(id)
        .bind(&f.title_en)
        .bind(&f.title_ar)
        .bind(&f.issuer)
        .bind(f.issued_on)
        .bind(f.expires_on)
        .bind(f.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to re-create certificate", e)
        })
    }

    /// Delete a certificate.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM certificates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete certificate", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SnapshotRepository for CertificateRepository {
    fn model_type(&self) -> ModelType {
        ModelType::Certificate
    }

    async fn load_snapshot(&self, id: Option<i64>) -> AppResult<Option<Snapshot>> {
        let id = require_id(id, ModelType::Certificate)?;
        Ok(self.find_by_id(id).await?.map(|c| c.snapshot()))
    }

    async fn exists(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::Certificate)?;
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM certificates WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check certificate", e)
            })
    }

    async fn update_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<bool> {
        let id = snapshot_id(snapshot, ModelType::Certificate)?;
        self.update(id, &CertificateFields::from_snapshot(snapshot)?)
            .await
    }

    async fn insert_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<Option<i64>> {
        let id = snapshot_id(snapshot, ModelType::Certificate)?;
        let fields = CertificateFields::from_snapshot(snapshot)?;
        Ok(Some(self.insert_with_id(id, &fields).await?))
    }

    async fn delete(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::Certificate)?;
        CertificateRepository::delete(self, id).await
    }
}
