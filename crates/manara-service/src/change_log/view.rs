//! Display projection of a change-log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use manara_core::types::{FieldChange, Snapshot};
use manara_entity::change_log::{ChangeAction, ChangeLogEntry, ChangeState};

/// A change-log entry as shown in the admin listing and detail screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeLogView {
    pub id: Uuid,
    pub model_type: String,
    /// English label of the entity kind; the raw tag for unknown kinds.
    pub model_label: String,
    /// Arabic label of the entity kind; the raw tag for unknown kinds.
    pub model_label_ar: String,
    pub model_id: Option<i64>,
    pub action: ChangeAction,
    pub changed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub status: ChangeState,
    pub reverted_at: Option<DateTime<Utc>>,
    pub reverted_by: Option<Uuid>,
    /// Fields captured in the old snapshot, identifier excluded.
    pub field_count: usize,
    /// Labelled old/new pairs; empty for deletes.
    pub changes: Vec<FieldChange>,
    /// Whether a revert can still be attempted.
    pub revertible: bool,
    pub old_data: Snapshot,
    pub new_data: Option<Snapshot>,
}

impl From<ChangeLogEntry> for ChangeLogView {
    fn from(entry: ChangeLogEntry) -> Self {
        let kind = entry.kind();
        let changes = entry.changes();
        let field_count = entry.field_count();
        let status = if entry.is_reverted() {
            ChangeState::Reverted
        } else {
            ChangeState::Active
        };
        let (model_label, model_label_ar) = match kind {
            Some(t) => (t.label().to_string(), t.label_ar().to_string()),
            None => (entry.model_type.clone(), entry.model_type.clone()),
        };

        Self {
            id: entry.id,
            model_type: entry.model_type,
            model_label,
            model_label_ar,
            model_id: entry.model_id,
            action: entry.action,
            changed_by: entry.changed_by,
            created_at: entry.created_at,
            status,
            reverted_at: entry.reverted_at,
            reverted_by: entry.reverted_by,
            field_count,
            changes,
            revertible: kind.is_some() && status == ChangeState::Active,
            old_data: entry.old_data.0,
            new_data: entry.new_data.map(|j| j.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    fn entry(model_type: &str, reverted: bool) -> ChangeLogEntry {
        let old = Snapshot::new()
            .field("id", 5_i64)
            .field("name_en", "Old")
            .field("slug", "old");
        let new = old.clone().field("name_en", "New");
        ChangeLogEntry {
            id: Uuid::new_v4(),
            model_type: model_type.to_string(),
            model_id: Some(5),
            action: ChangeAction::Update,
            changed_by: None,
            old_data: Json(old),
            new_data: Some(Json(new)),
            created_at: Utc::now(),
            reverted_at: reverted.then(Utc::now),
            reverted_by: None,
        }
    }

    #[test]
    fn test_view_of_active_entry() {
        let view = ChangeLogView::from(entry("product", false));
        assert_eq!(view.model_label, "Product");
        assert_eq!(view.status, ChangeState::Active);
        assert_eq!(view.field_count, 2);
        assert_eq!(view.changes.len(), 1);
        assert_eq!(view.changes[0].label, "Name (EN)");
        assert!(view.revertible);
    }

    #[test]
    fn test_view_of_reverted_or_unknown_entry() {
        let reverted = ChangeLogView::from(entry("product", true));
        assert_eq!(reverted.status, ChangeState::Reverted);
        assert!(!reverted.revertible);

        let unknown = ChangeLogView::from(entry("newsletter", false));
        assert_eq!(unknown.model_label, "newsletter");
        assert!(!unknown.revertible);
    }
}
