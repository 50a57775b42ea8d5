//! Tracked record entities.
//!
//! Each tracked table has a row model (`FromRow`) implementing
//! [`Trackable`], and a `*Fields` value holding just the trackable columns,
//! rebuilt from a snapshot on restore.

pub mod application;
pub mod career;
pub mod certificate;
pub mod media;
pub mod product;
pub mod settings;
pub mod site_content;

pub use application::{JobApplication, JobApplicationFields};
pub use career::{Career, CareerFields};
pub use certificate::{Certificate, CertificateFields};
pub use media::{MediaFields, MediaItem};
pub use product::{Product, ProductFields};
pub use settings::{SiteSettings, SiteSettingsFields};
pub use site_content::{SiteContent, SiteContentFields};

use manara_core::AppResult;
use manara_core::types::model_type::ID_FIELD;
use manara_core::types::{ModelType, Snapshot};

/// A row whose trackable fields can be captured as a [`Snapshot`].
pub trait Trackable {
    /// Entity kind of the row.
    const MODEL_TYPE: ModelType;

    /// Primary key of the row.
    fn record_id(&self) -> i64;

    /// Capture the identifier followed by every trackable field, in the
    /// order listed by [`ModelType::tracked_fields`].
    fn snapshot(&self) -> Snapshot;
}

/// The trackable columns of a row, rebuilt from a snapshot.
pub trait FromSnapshot: Sized {
    /// Parse the trackable fields. Malformed values are validation errors.
    fn from_snapshot(snapshot: &Snapshot) -> AppResult<Self>;
}

/// Start a snapshot with the identifier field.
pub(crate) fn snapshot_with_id(id: i64) -> Snapshot {
    Snapshot::new().field(ID_FIELD, id)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    pub fn product() -> Product {
        Product {
            id: 42,
            name_en: "Rebar 10mm".to_string(),
            name_ar: "حديد تسليح 10 مم".to_string(),
            slug: "rebar-10mm".to_string(),
            description_en: Some("High tensile".to_string()),
            description_ar: None,
            category: Some("steel".to_string()),
            is_active: true,
            sort_order: 3,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    pub fn career() -> Career {
        Career {
            id: 7,
            title_en: "Site Engineer".to_string(),
            title_ar: "مهندس موقع".to_string(),
            description_en: None,
            description_ar: None,
            location: Some("Riyadh".to_string()),
            employment_type: "full_time".to_string(),
            status: "open".to_string(),
            closes_on: NaiveDate::from_ymd_opt(2025, 6, 30),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn application() -> JobApplication {
        JobApplication {
            id: 11,
            career_id: Some(7),
            applicant_name: "Sara Ahmed".to_string(),
            email: "sara@example.com".to_string(),
            phone: None,
            status: "new".to_string(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn certificate() -> Certificate {
        Certificate {
            id: 5,
            title_en: "ISO 9001".to_string(),
            title_ar: "آيزو 9001".to_string(),
            issuer: Some("BSI".to_string()),
            issued_on: NaiveDate::from_ymd_opt(2023, 2, 1),
            expires_on: None,
            is_active: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn settings() -> SiteSettings {
        SiteSettings {
            id: manara_core::types::model_type::SETTINGS_ROW_ID,
            site_name_en: "Manara".to_string(),
            site_name_ar: "منارة".to_string(),
            contact_email: Some("info@example.com".to_string()),
            contact_phone: None,
            address_en: None,
            address_ar: None,
            maintenance_mode: false,
            updated_at: Utc::now(),
        }
    }

    pub fn site_content() -> SiteContent {
        SiteContent {
            id: 3,
            page: "home".to_string(),
            section: "hero".to_string(),
            content_key: "headline".to_string(),
            content_en: "Building the future".to_string(),
            content_ar: "نبني المستقبل".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn media() -> MediaItem {
        MediaItem {
            id: 9,
            title_en: Some("Plant".to_string()),
            title_ar: None,
            alt_en: None,
            alt_ar: None,
            file_path: "media/plant.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            collection: "gallery".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures;
    use super::*;

    fn assert_shape<T: Trackable>(row: &T) {
        let snapshot = row.snapshot();
        let expected: Vec<&str> = std::iter::once(ID_FIELD)
            .chain(T::MODEL_TYPE.tracked_fields().iter().copied())
            .collect();
        assert_eq!(snapshot.keys().collect::<Vec<_>>(), expected, "{}", T::MODEL_TYPE);
        assert_eq!(snapshot.id(), Some(row.record_id()));
        assert!(snapshot.validate_for(T::MODEL_TYPE).is_ok());
    }

    #[test]
    fn test_every_snapshot_matches_tracked_fields() {
        assert_shape(&fixtures::product());
        assert_shape(&fixtures::career());
        assert_shape(&fixtures::application());
        assert_shape(&fixtures::certificate());
        assert_shape(&fixtures::settings());
        assert_shape(&fixtures::site_content());
        assert_shape(&fixtures::media());
    }
}
