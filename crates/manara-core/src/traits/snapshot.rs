//! Storage seam used by the undo registry to restore records.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{ModelType, Snapshot};

/// Per-model persistence operations expressed purely in snapshots.
///
/// Each tracked model type has one implementation. The undo and change-log
/// services only ever talk to records through this trait, so they never
/// depend on a concrete row type.
#[async_trait]
pub trait SnapshotRepository: Send + Sync + 'static {
    /// The model type this repository serves.
    fn model_type(&self) -> ModelType;

    /// Load the current state of a record as a snapshot.
    ///
    /// For singleton types `id` is ignored.
    async fn load_snapshot(&self, id: Option<i64>) -> AppResult<Option<Snapshot>>;

    /// Whether the record currently exists.
    async fn exists(&self, id: Option<i64>) -> AppResult<bool>;

    /// Overwrite the trackable fields of an existing record.
    ///
    /// Returns `false` when no row matched.
    async fn update_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<bool>;

    /// Re-create a deleted record, preserving the identifier carried in the
    /// snapshot. Returns the identifier of the inserted row.
    async fn insert_from_snapshot(&self, snapshot: &Snapshot) -> AppResult<Option<i64>>;

    /// Delete a record. Returns `false` when no row matched.
    async fn delete(&self, id: Option<i64>) -> AppResult<bool>;
}
