//! Core type definitions used across the Manara workspace.

pub mod model_type;
pub mod pagination;
pub mod period;
pub mod snapshot;
pub mod value;

pub use model_type::ModelType;
pub use pagination::{PageRequest, PageResponse};
pub use period::Period;
pub use snapshot::{FieldChange, Snapshot};
pub use value::{FieldKind, SnapshotValue};
