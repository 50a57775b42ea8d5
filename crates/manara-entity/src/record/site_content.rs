//! Editable site copy blocks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use manara_core::AppResult;
use manara_core::types::{ModelType, Snapshot};

use super::{FromSnapshot, Trackable, snapshot_with_id};

/// One bilingual copy block, addressed by `(page, section, content_key)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteContent {
    pub id: i64,
    pub page: String,
    pub section: String,
    pub content_key: String,
    pub content_en: String,
    pub content_ar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trackable for SiteContent {
    const MODEL_TYPE: ModelType = ModelType::SiteContent;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn snapshot(&self) -> Snapshot {
        snapshot_with_id(self.id)
            .field("page", &self.page)
            .field("section", &self.section)
            .field("content_key", &self.content_key)
            .field("content_en", &self.content_en)
            .field("content_ar", &self.content_ar)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContentFields {
    pub page: String,
    pub section: String,
    pub content_key: String,
    pub content_en: String,
    pub content_ar: String,
}

impl FromSnapshot for SiteContentFields {
    fn from_snapshot(s: &Snapshot) -> AppResult<Self> {
        Ok(Self {
            page: s.text("page")?,
            section: s.text("section")?,
            content_key: s.text("content_key")?,
            content_en: s.text("content_en")?,
            content_ar: s.text("content_ar")?,
        })
    }
}
