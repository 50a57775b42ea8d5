//! Query filter for the change-log listing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use manara_core::types::{ModelType, Period};

/// Revert state of a change-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeState {
    /// Not yet reverted.
    Active,
    /// Reverted by an administrator.
    Reverted,
}

impl ChangeState {
    /// Parse a query-string value. Unrecognised values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "reverted" => Some(Self::Reverted),
            _ => None,
        }
    }
}

/// Optional constraints applied to the change-log listing. All present
/// constraints must hold.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeLogFilter {
    /// Only entries for this entity kind.
    pub model_type: Option<ModelType>,
    /// Only entries for this record id.
    pub model_id: Option<i64>,
    /// Only entries made by this user.
    pub changed_by: Option<Uuid>,
    /// Only entries created within this window.
    pub period: Option<Period>,
    /// Only active or only reverted entries.
    pub state: Option<ChangeState>,
}
