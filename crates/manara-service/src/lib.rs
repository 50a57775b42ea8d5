//! # manara-service
//!
//! Business logic for the Manara undo subsystem. Services orchestrate the
//! change-log store, the per-type snapshot repositories, and the session
//! undo slots held in the cache.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod change_log;
pub mod context;
pub mod mutation;
pub mod testing;
pub mod undo;

pub use change_log::{ChangeLogService, ChangeLogView, RevertOutcome};
pub use context::RequestContext;
pub use mutation::{MutationOutcome, TrackedMutationService};
pub use undo::{
    ChangeLogStore, Comparison, FieldDiff, RestoreHandler, RestoreRegistry, SlotStore,
    UndoMeta, UndoOutcome, UndoService, UndoSlot, compare,
};
