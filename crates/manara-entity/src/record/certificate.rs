//! Certificate entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use manara_core::AppResult;
use manara_core::types::{ModelType, Snapshot};

use super::{FromSnapshot, Trackable, snapshot_with_id};

/// A quality or compliance certificate shown on the site.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Certificate {
    pub id: i64,
    pub title_en: String,
    pub title_ar: String,
    pub issuer: Option<String>,
    pub issued_on: Option<NaiveDate>,
    pub expires_on: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trackable for Certificate {
    const MODEL_TYPE: ModelType = ModelType::Certificate;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn snapshot(&self) -> Snapshot {
        snapshot_with_id(self.id)
            .field("title_en", &self.title_en)
            .field("title_ar", &self.title_ar)
            .field("issuer", &self.issuer)
            .field("issued_on", self.issued_on)
            .field("expires_on", self.expires_on)
            .field("is_active", self.is_active)
    }
}

/// Trackable columns of a certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateFields {
    pub title_en: String,
    pub title_ar: String,
    pub issuer: Option<String>,
    pub issued_on: Option<NaiveDate>,
    pub expires_on: Option<NaiveDate>,
    pub is_active: bool,
}

impl FromSnapshot for CertificateFields {
    fn from_snapshot(s: &Snapshot) -> AppResult<Self> {
        Ok(Self {
            title_en: s.text("title_en")?,
            title_ar: s.text("title_ar")?,
            issuer: s.opt_text("issuer"),
            issued_on: s.opt_date("issued_on")?,
            expires_on: s.opt_date("expires_on")?,
            is_active: s.flag("is_active")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures;

    #[test]
    fn test_inactive_flag_and_empty_date() {
        let s = fixtures::certificate().snapshot();
        assert_eq!(s.get("is_active"), Some("0"));
        assert_eq!(s.get("expires_on"), Some(""));
        let fields = CertificateFields::from_snapshot(&s).unwrap();
        assert!(!fields.is_active);
        assert_eq!(fields.expires_on, None);
    }
}
