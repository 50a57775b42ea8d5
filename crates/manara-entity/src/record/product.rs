//! Catalogue product entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use manara_core::{AppError, AppResult};
use manara_core::types::{ModelType, Snapshot};

use super::{FromSnapshot, Trackable, snapshot_with_id};

/// A product in the public catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Primary key.
    pub id: i64,
    /// English name.
    pub name_en: String,
    /// Arabic name.
    pub name_ar: String,
    /// URL slug, unique.
    pub slug: String,
    /// English description.
    pub description_en: Option<String>,
    /// Arabic description.
    pub description_ar: Option<String>,
    /// Catalogue category.
    pub category: Option<String>,
    /// Whether the product is shown publicly.
    pub is_active: bool,
    /// Position within its category.
    pub sort_order: i32,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Trackable for Product {
    const MODEL_TYPE: ModelType = ModelType::Product;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn snapshot(&self) -> Snapshot {
        snapshot_with_id(self.id)
            .field("name_en", &self.name_en)
            .field("name_ar", &self.name_ar)
            .field("slug", &self.slug)
            .field("description_en", &self.description_en)
            .field("description_ar", &self.description_ar)
            .field("category", &self.category)
            .field("is_active", self.is_active)
            .field("sort_order", self.sort_order)
    }
}

/// Trackable columns of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name_en: String,
    pub name_ar: String,
    pub slug: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub category: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl FromSnapshot for ProductFields {
    fn from_snapshot(s: &Snapshot) -> AppResult<Self> {
        Ok(Self {
            name_en: s.text("name_en")?,
            name_ar: s.text("name_ar")?,
            slug: s.text("slug")?,
            description_en: s.opt_text("description_en"),
            description_ar: s.opt_text("description_ar"),
            category: s.opt_text("category"),
            is_active: s.flag("is_active")?,
            sort_order: match s.opt_int("sort_order")? {
                Some(v) => i32::try_from(v)
                    .map_err(|_| AppError::validation("Field 'sort_order' is out of range"))?,
                None => 0,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures;

    #[test]
    fn test_snapshot_coerces_columns() {
        let s = fixtures::product().snapshot();
        assert_eq!(s.get("is_active"), Some("1"));
        assert_eq!(s.get("sort_order"), Some("3"));
        assert_eq!(s.get("description_ar"), Some(""));
    }

    #[test]
    fn test_fields_from_snapshot() {
        let p = fixtures::product();
        let fields = ProductFields::from_snapshot(&p.snapshot()).unwrap();
        assert_eq!(fields.name_en, p.name_en);
        assert_eq!(fields.description_ar, None);
        assert!(fields.is_active);
        assert_eq!(fields.sort_order, 3);
    }

    #[test]
    fn test_malformed_flag_rejected() {
        let s = fixtures::product().snapshot().field("is_active", "maybe");
        assert!(ProductFields::from_snapshot(&s).is_err());
    }
}
