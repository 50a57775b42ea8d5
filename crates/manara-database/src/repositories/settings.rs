//! Site settings repository implementation.
//!
//! Settings is a singleton: every operation targets row
//! [`SETTINGS_ROW_ID`] and ignores the id it is given.

use async_trait::async_trait;
use sqlx::PgPool;

use manara_core::error::{AppError, ErrorKind};
use manara_core::result::AppResult;
use manara_core::traits::SnapshotRepository;
use manara_core::types::model_type::SETTINGS_ROW_ID;
use manara_core::types::{ModelType, Snapshot};
use manara_entity::record::{FromSnapshot, SiteSettings, SiteSettingsFields, Trackable};

/// Repository for the site settings row.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the settings row, if it has been created.
    pub async fn get(&self) -> AppResult<Option<SiteSettings>> {
        sqlx::query_as::<_, SiteSettings>("SELECT * FROM site_settings WHERE id = $1")
            .bind(SETTINGS_ROW_ID)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load settings", e))
    }

    /// Insert or overwrite the settings row.
    pub async fn upsert(&self, f: &SiteSettingsFields) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO site_settings (id, site_name_en, site_name_ar, contact_email, contact_phone, \
             address_en, address_ar, maintenance_mode) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET site_name_en = EXCLUDED.site_name_en, \
             site_name_ar = EXCLUDED.site_name_ar, contact_email = EXCLUDED.contact_email, \
             contact_phone = EXCLUDED.contact_phone, address_en = EXCLUDED.address_en, \
             address_ar = EXCLUDED.address_ar, maintenance_mode = EXCLUDED.maintenance_mode, \
             updated_at = NOW()",
        )
        .bind(SETTINGS_ROW_ID)
        .bind(&f.site_name_en)
        .bind(&f.site_name_ar)
        .bind(&f.contact_email)
        .bind(&f.contact_phone)
        .bind(&f.address_en)
        .bind(&f.address_ar)
        .bind(f.maintenance_mode)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save settings", e))?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotRepository for SettingsRepository {
    fn model_type(&self) -> ModelType {
        ModelType::Settings
    }

    async fn load_snapshot(&self, _id: Option<i64>) -> AppResult<Option<Snapshot>> {
        Ok(self.get().await?.map(|s| s.snapshot()))
    }

    async fn exists(&self, _id: Option<i64>) -> AppResult<bool> {
        Ok(self.get().await?.is_some())
    }

    async fn update_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<bool> {
        self.upsert(&SiteSettingsFields::from_snapshot(snapshot)?)
            .await?;
        Ok(true)
    }

    async fn insert_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<Option<i64>> {
        self.upsert(&SiteSettingsFields::from_snapshot(snapshot)?)
            .await?;
        Ok(None)
    }

    async fn delete(&self, _id: Option<i64>) -> AppResult<bool> {
        Err(AppError::validation("Site settings cannot be deleted"))
    }
}
