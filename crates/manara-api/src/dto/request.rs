//! Query-string DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use manara_core::error::AppError;
use manara_core::types::{ModelType, Period};
use manara_entity::change_log::{ChangeLogFilter, ChangeState};

/// `?id=` selector used by the undo endpoints. Omitted for singletons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordQuery {
    pub id: Option<i64>,
}

/// Filters accepted by `GET /api/admin/change-logs`.
///
/// Unrecognised `period`, `state` and `user_id` values are ignored rather
/// than rejected; an unknown `model_type` is an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeLogQuery {
    pub model_type: Option<String>,
    pub model_id: Option<i64>,
    pub user_id: Option<String>,
    pub period: Option<String>,
    pub state: Option<String>,
}

impl ChangeLogQuery {
    /// Convert into a service filter.
    pub fn into_filter(self) -> Result<ChangeLogFilter, AppError> {
        let model_type = match self.model_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(tag) => Some(tag.parse::<ModelType>()?),
        };

        Ok(ChangeLogFilter {
            model_type,
            model_id: self.model_id,
            changed_by: self.user_id.and_then(|s| Uuid::parse_str(&s).ok()),
            period: self.period.as_deref().and_then(Period::parse),
            state: self.state.as_deref().and_then(ChangeState::parse),
        })
    }
}
