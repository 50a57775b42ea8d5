//! Media library metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use manara_core::AppResult;
use manara_core::types::{ModelType, Snapshot};

use super::{FromSnapshot, Trackable, snapshot_with_id};

/// Metadata row for an uploaded file. The file itself lives in external
/// storage and is not touched by restores.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MediaItem {
    pub id: i64,
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub alt_en: Option<String>,
    pub alt_ar: Option<String>,
    /// Path of the stored file relative to the media root.
    pub file_path: String,
    pub mime_type: String,
    /// Gallery or collection the item belongs to.
    pub collection: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trackable for MediaItem {
    const MODEL_TYPE: ModelType = ModelType::Media;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn snapshot(&self) -> Snapshot {
        snapshot_with_id(self.id)
            .field("title_en", &self.title_en)
            .field("title_ar", &self.title_ar)
            .field("alt_en", &self.alt_en)
            .field("alt_ar", &self.alt_ar)
            .field("file_path", &self.file_path)
            .field("mime_type", &self.mime_type)
            .field("collection", &self.collection)
    }
}

/// Trackable columns of a media item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFields {
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub alt_en: Option<String>,
    pub alt_ar: Option<String>,
    pub file_path: String,
    pub mime_type: String,
    pub collection: String,
}

impl FromSnapshot for MediaFields {
    fn from_snapshot(s: &Snapshot) -> AppResult<Self> {
        Ok(Self {
            title_en: s.opt_text("title_en"),
            title_ar: s.opt_text("title_ar"),
            alt_en: s.opt_text("alt_en"),
            alt_ar: s.opt_text("alt_ar"),
            file_path: s.text("file_path")?,
            mime_type: s.text("mime_type")?,
            collection: s.text("collection")?,
        })
    }
}
