//! Change-log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use manara_core::types::model_type::ID_FIELD;
use manara_core::types::{FieldChange, ModelType, Snapshot};

use super::action::ChangeAction;

/// A durable record of one admin mutation.
///
/// Entries are append-only: the only permitted update is setting
/// `reverted_at`/`reverted_by`, once.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChangeLogEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Wire tag of the entity kind (e.g. `"product"`).
    pub model_type: String,
    /// Record id; `None` for singleton kinds.
    pub model_id: Option<i64>,
    /// Update or delete.
    pub action: ChangeAction,
    /// The administrator who made the change, when known.
    pub changed_by: Option<Uuid>,
    /// Full snapshot before the change.
    pub old_data: Json<Snapshot>,
    /// Full snapshot after the change; absent for deletes.
    pub new_data: Option<Json<Snapshot>>,
    /// When the change was made.
    pub created_at: DateTime<Utc>,
    /// When the entry was reverted, if it was.
    pub reverted_at: Option<DateTime<Utc>>,
    /// Who reverted it.
    pub reverted_by: Option<Uuid>,
}

impl ChangeLogEntry {
    /// Resolve the stored wire tag.
    ///
    /// Entries written for a kind that no longer exists yield `None`.
    pub fn kind(&self) -> Option<ModelType> {
        ModelType::parse(&self.model_type)
    }

    /// Whether the entry has been reverted.
    pub fn is_reverted(&self) -> bool {
        self.reverted_at.is_some()
    }

    /// Labelled field changes between the old and new snapshots.
    ///
    /// Delete entries have no new snapshot and report no changes.
    pub fn changes(&self) -> Vec<FieldChange> {
        match &self.new_data {
            Some(new) => self.old_data.0.changes_to(&new.0),
            None => Vec::new(),
        }
    }

    /// Number of trackable fields captured, identifier excluded.
    pub fn field_count(&self) -> usize {
        self.old_data.0.keys().filter(|k| *k != ID_FIELD).count()
    }
}

/// Data required to append a change-log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChangeLogEntry {
    /// Entity kind.
    pub model_type: ModelType,
    /// Record id (already normalised through [`ModelType::log_id`]).
    pub model_id: Option<i64>,
    /// Update or delete.
    pub action: ChangeAction,
    /// Acting administrator.
    pub changed_by: Option<Uuid>,
    /// Snapshot before the change.
    pub old_data: Snapshot,
    /// Snapshot after the change.
    pub new_data: Option<Snapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(new_data: Option<Snapshot>) -> ChangeLogEntry {
        let action = if new_data.is_some() {
            ChangeAction::Update
        } else {
            ChangeAction::Delete
        };
        ChangeLogEntry {
            id: Uuid::new_v4(),
            model_type: "product".to_string(),
            model_id: Some(42),
            action,
            changed_by: None,
            old_data: Json(
                Snapshot::new()
                    .field("id", 42_i64)
                    .field("name_en", "Rebar 10mm")
                    .field("is_active", true),
            ),
            new_data: new_data.map(Json),
            created_at: Utc::now(),
            reverted_at: None,
            reverted_by: None,
        }
    }

    #[test]
    fn test_changes_derived_from_snapshots() {
        let e = entry(Some(
            Snapshot::new()
                .field("id", 42_i64)
                .field("name_en", "Rebar 12mm")
                .field("is_active", true),
        ));
        let changes = e.changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "name_en");
        assert_eq!(e.kind(), Some(ModelType::Product));
        assert_eq!(e.field_count(), 2);
    }

    #[test]
    fn test_delete_entry_has_no_changes() {
        let e = entry(None);
        assert!(e.changes().is_empty());
        assert!(!e.is_reverted());
    }
}
