//! Job listing entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use manara_core::AppResult;
use manara_core::types::{ModelType, Snapshot};

use super::{FromSnapshot, Trackable, snapshot_with_id};

/// An open or closed job listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Career {
    /// Primary key.
    pub id: i64,
    /// English title.
    pub title_en: String,
    /// Arabic title.
    pub title_ar: String,
    /// English description.
    pub description_en: Option<String>,
    /// Arabic description.
    pub description_ar: Option<String>,
    /// Work location.
    pub location: Option<String>,
    /// e.g. `full_time`, `contract`.
    pub employment_type: String,
    /// e.g. `open`, `closed`.
    pub status: String,
    /// Last day applications are accepted.
    pub closes_on: Option<NaiveDate>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Trackable for Career {
    const MODEL_TYPE: ModelType = ModelType::Career;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn snapshot(&self) -> Snapshot {
        snapshot_with_id(self.id)
            .field("title_en", &self.title_en)
            .field("title_ar", &self.title_ar)
            .field("description_en", &self.description_en)
            .field("description_ar", &self.description_ar)
            .field("location", &self.location)
            .field("employment_type", &self.employment_type)
            .field("status", &self.status)
            .field("closes_on", self.closes_on)
    }
}

/// Trackable columns of a job listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerFields {
    pub title_en: String,
    pub title_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub location: Option<String>,
    pub employment_type: String,
    pub status: String,
    pub closes_on: Option<NaiveDate>,
}

impl FromSnapshot for CareerFields {
    fn from_snapshot(s: &Snapshot) -> AppResult<Self> {
        Ok(Self {
            title_en: s.text("title_en")?,
            title_ar: s.text("title_ar")?,
            description_en: s.opt_text("description_en"),
            description_ar: s.opt_text("description_ar"),
            location: s.opt_text("location"),
            employment_type: s.text("employment_type")?,
            status: s.text("status")?,
            closes_on: s.opt_date("closes_on")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures;

    #[test]
    fn test_date_roundtrip_through_snapshot() {
        let c = fixtures::career();
        let s = c.snapshot();
        assert_eq!(s.get("closes_on"), Some("2025-06-30"));
        let fields = CareerFields::from_snapshot(&s).unwrap();
        assert_eq!(fields.closes_on, c.closes_on);
    }
}
