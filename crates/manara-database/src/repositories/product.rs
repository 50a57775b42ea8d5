//! Product repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use manara_core::error::{AppError, ErrorKind};
use manara_core::result::AppResult;
use manara_core::traits::SnapshotRepository;
use manara_core::types::{ModelType, Snapshot};
use manara_entity::record::{FromSnapshot, Product, ProductFields, Trackable};

use super::{require_id, snapshot_id};

/// Repository for catalogue products.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a product by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find product", e))
    }

    /// Overwrite the trackable columns of a product.
    pub async fn update(&self, id: i64, f: &ProductFields) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE products SET name_en = $2, name_ar = $3, slug = $4, description_en = $5, \
             description_ar = $6, category = $7, is_active = $8, sort_order = $9, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&f.name_en)
        .bind(&f.name_ar)
        .bind(&f.slug)
        .bind(&f.description_en)
        .bind(&f.description_ar)
        .bind(&f.category)
        .bind(f.is_active)
        .bind(f.sort_order)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update product", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a product with an explicit id.
    pub async fn insert_with_id(&self, id: i64, f: &ProductFields) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO products (id, name_en, name_ar, slug, description_en, description_ar, \
             category, is_active, sort_order) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        )
        .bind(id)
        .bind(&f.name_en)
        .bind(&f.name_ar)
        .bind(&f.slug)
        .bind(&f.description_en)
        .bind(&f.description_ar)
        .bind(&f.category)
        .bind(f.is_active)
        .bind(f.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to re-create product", e))
    }

    /// Delete a product. Its images are removed by cascade.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete product", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SnapshotRepository for ProductRepository {
    fn model_type(&self) -> ModelType {
        ModelType::Product
    }

    async fn load_snapshot(&self, id: Option<i64>) -> AppResult<Option<Snapshot>> {
        let id = require_id(id, ModelType::Product)?;
        Ok(self.find_by_id(id).await?.map(|p| p.snapshot()))
    }

    async fn exists(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::Product)?;
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check product", e))
    }

    async fn update_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<bool> {
        let id = snapshot_id(snapshot, ModelType::Product)?;
        self.update(id, &ProductFields::from_snapshot(snapshot)?).await
    }

    async fn insert_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<Option<i64>> {
        let id = snapshot_id(snapshot, ModelType::Product)?;
        let fields = ProductFields::from_snapshot(snapshot)?;
        Ok(Some(self.insert_with_id(id, &fields).await?))
    }

    async fn delete(&self, id: Option<i64>) -> AppResult<bool> {
        let id = require_id(id, ModelType::Product)?;
        ProductRepository::delete(self, id).await
    }
}
