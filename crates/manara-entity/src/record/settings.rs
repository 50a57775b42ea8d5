//! Site-wide settings singleton.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use manara_core::AppResult;
use manara_core::types::{ModelType, Snapshot};

use super::{FromSnapshot, Trackable, snapshot_with_id};

/// The single settings row (`id = 1`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteSettings {
    /// Always [`SETTINGS_ROW_ID`](manara_core::types::model_type::SETTINGS_ROW_ID).
    pub id: i64,
    pub site_name_en: String,
    pub site_name_ar: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address_en: Option<String>,
    pub address_ar: Option<String>,
    /// When `true` the public site shows a maintenance page.
    pub maintenance_mode: bool,
    pub updated_at: DateTime<Utc>,
}

impl Trackable for SiteSettings {
    const MODEL_TYPE: ModelType = ModelType::Settings;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn snapshot(&self) -> Snapshot {
        snapshot_with_id(self.id)
            .field("site_name_en", &self.site_name_en)
            .field("site_name_ar", &self.site_name_ar)
            .field("contact_email", &self.contact_email)
            .field("contact_phone", &self.contact_phone)
            .field("address_en", &self.address_en)
            .field("address_ar", &self.address_ar)
            .field("maintenance_mode", self.maintenance_mode)
    }
}

/// Trackable columns of the settings row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettingsFields {
    pub site_name_en: String,
    pub site_name_ar: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address_en: Option<String>,
    pub address_ar: Option<String>,
    pub maintenance_mode: bool,
}

impl FromSnapshot for SiteSettingsFields {
    fn from_snapshot(s: &Snapshot) -> AppResult<Self> {
        Ok(Self {
            site_name_en: s.text("site_name_en")?,
            site_name_ar: s.text("site_name_ar")?,
            contact_email: s.opt_text("contact_email"),
            contact_phone: s.opt_text("contact_phone"),
            address_en: s.opt_text("address_en"),
            address_ar: s.opt_text("address_ar"),
            maintenance_mode: s.flag("maintenance_mode")?,
        })
    }
}
