//! The closed set of entity kinds tracked by the undo subsystem.
//!
//! A `ModelType` is both the routing key for restores and the label shown
//! in the change-log screens. Per-type facts (labels, trackable fields,
//! landing URL) are answered by exhaustive `match`es, so adding a variant
//! does not compile until each of them is supplied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::value::FieldKind;
use crate::error::AppError;

/// Name of the identifier field present in every snapshot.
pub const ID_FIELD: &str = "id";

/// Row id of the singleton settings record.
pub const SETTINGS_ROW_ID: i64 = 1;

/// A tracked entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Catalogue product.
    Product,
    /// Job listing.
    Career,
    /// Job application submitted against a career listing.
    Application,
    /// Quality or compliance certificate.
    Certificate,
    /// Site-wide settings (singleton).
    Settings,
    /// Editable site copy block.
    SiteContent,
    /// Media library item.
    Media,
}

impl ModelType {
    /// Every tracked entity kind.
    pub const ALL: [ModelType; 7] = [
        Self::Product,
        Self::Career,
        Self::Application,
        Self::Certificate,
        Self::Settings,
        Self::SiteContent,
        Self::Media,
    ];

    /// Wire tag stored in `change_logs.model_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Career => "career",
            Self::Application => "application",
            Self::Certificate => "certificate",
            Self::Settings => "settings",
            Self::SiteContent => "site_content",
            Self::Media => "media",
        }
    }

    /// Resolve a wire tag. Unknown tags yield `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag.trim()))
    }

    /// English display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Career => "Career",
            Self::Application => "Job Application",
            Self::Certificate => "Certificate",
            Self::Settings => "Settings",
            Self::SiteContent => "Site Content",
            Self::Media => "Media",
        }
    }

    /// Arabic display label.
    pub fn label_ar(&self) -> &'static str {
        match self {
            Self::Product => "منتج",
            Self::Career => "وظيفة",
            Self::Application => "طلب توظيف",
            Self::Certificate => "شهادة",
            Self::Settings => "الإعدادات",
            Self::SiteContent => "محتوى الموقع",
            Self::Media => "الوسائط",
        }
    }

    /// Storage type of a trackable field. Unknown names read as text.
    pub fn field_kind(&self, field: &str) -> FieldKind {
        match (self, field) {
            (Self::Product | Self::Certificate, "is_active") => FieldKind::Flag,
            (Self::Settings, "maintenance_mode") => FieldKind::Flag,
            (Self::Product, "sort_order") => FieldKind::Integer,
            (Self::Application, "career_id") => FieldKind::Integer,
            (Self::Career, "closes_on") => FieldKind::Date,
            (Self::Certificate, "issued_on" | "expires_on") => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }

    /// The fixed list of fields whose changes are captured, identifier excluded.
    pub fn tracked_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Product => &[
                "name_en",
                "name_ar",
                "slug",
                "description_en",
                "description_ar",
                "category",
                "is_active",
                "sort_order",
            ],
            Self::Career => &[
                "title_en",
                "title_ar",
                "description_en",
                "description_ar",
                "location",
                "employment_type",
                "status",
                "closes_on",
            ],
            Self::Application => &[
                "career_id",
                "applicant_name",
                "email",
                "phone",
                "status",
                "notes",
            ],
            Self::Certificate => &[
                "title_en",
                "title_ar",
                "issuer",
                "issued_on",
                "expires_on",
                "is_active",
            ],
            Self::Settings => &[
                "site_name_en",
                "site_name_ar",
                "contact_email",
                "contact_phone",
                "address_en",
                "address_ar",
                "maintenance_mode",
            ],
            Self::SiteContent => &["page", "section", "content_key", "content_en", "content_ar"],
            Self::Media => &[
                "title_en",
                "title_ar",
                "alt_en",
                "alt_ar",
                "file_path",
                "mime_type",
                "collection",
            ],
        }
    }

    /// Whether this kind is a single conceptual record with no per-row id.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Settings)
    }

    /// The id recorded in the change log for a record of this kind.
    ///
    /// Singletons are logged without an id.
    pub fn log_id(&self, model_id: Option<i64>) -> Option<i64> {
        if self.is_singleton() { None } else { model_id }
    }

    /// Admin URL to land on after a record of this kind was restored.
    ///
    /// Returns an empty string when a per-record URL is required but no
    /// id is known; callers treat a blank URL as a failed restore.
    pub fn restore_url(&self, model_id: Option<i64>) -> String {
        let with_id = |path: &str, suffix: &str| match model_id {
            Some(id) => format!("/admin/{path}/{id}{suffix}"),
            None => String::new(),
        };
        match self {
            Self::Product => with_id("products", "/edit"),
            Self::Career => with_id("careers", "/edit"),
            Self::Application => with_id("applications", ""),
            Self::Certificate => with_id("certificates", "/edit"),
            Self::Settings => "/admin/settings".to_string(),
            Self::SiteContent => "/admin/site-content".to_string(),
            Self::Media => "/admin/media".to_string(),
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AppError::unknown_model_type(s))
    }
}

/// Human-readable label for a snapshot field name.
///
/// `name_en` becomes `Name (EN)`, `is_active` becomes `Is Active`,
/// `career_id` becomes `Career`.
pub fn field_label(field: &str) -> String {
    let (stem, lang) = match field.rsplit_once('_') {
        Some((stem, "en")) => (stem, Some("EN")),
        Some((stem, "ar")) => (stem, Some("AR")),
        Some((stem, "id")) if !stem.is_empty() => (stem, None),
        _ => (field, None),
    };

    let words: Vec<String> = stem
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    match lang {
        Some(lang) => format!("{} ({lang})", words.join(" ")),
        None => words.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for t in ModelType::ALL {
            assert_eq!(ModelType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ModelType::parse("SITE_CONTENT"), Some(ModelType::SiteContent));
        assert_eq!(ModelType::parse("unknown_type"), None);
    }

    #[test]
    fn test_from_str_unknown_is_error() {
        let err = "newsletter".parse::<ModelType>().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::UnknownModelType);
    }

    #[test]
    fn test_tracked_fields_exclude_identifier() {
        for t in ModelType::ALL {
            assert!(!t.tracked_fields().contains(&ID_FIELD), "{t}");
            assert!(!t.tracked_fields().is_empty());
        }
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(ModelType::Product.field_kind("is_active"), FieldKind::Flag);
        assert_eq!(ModelType::Product.field_kind("sort_order"), FieldKind::Integer);
        assert_eq!(ModelType::Certificate.field_kind("expires_on"), FieldKind::Date);
        assert_eq!(ModelType::Application.field_kind("career_id"), FieldKind::Integer);
        assert_eq!(ModelType::Career.field_kind("status"), FieldKind::Text);
    }

    #[test]
    fn test_restore_urls() {
        assert_eq!(
            ModelType::Product.restore_url(Some(7)),
            "/admin/products/7/edit"
        );
        assert_eq!(ModelType::Application.restore_url(Some(3)), "/admin/applications/3");
        assert_eq!(ModelType::Settings.restore_url(None), "/admin/settings");
        assert_eq!(ModelType::Career.restore_url(None), "");
    }

    #[test]
    fn test_log_id_for_singleton() {
        assert_eq!(ModelType::Settings.log_id(Some(SETTINGS_ROW_ID)), None);
        assert_eq!(ModelType::Media.log_id(Some(4)), Some(4));
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("name_en"), "Name (EN)");
        assert_eq!(field_label("description_ar"), "Description (AR)");
        assert_eq!(field_label("is_active"), "Is Active");
        assert_eq!(field_label("career_id"), "Career");
        assert_eq!(field_label("slug"), "Slug");
    }
}
