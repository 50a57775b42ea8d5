//! Single-step undo: change capture, session slots, and restore dispatch.

pub mod compare;
pub mod registry;
pub mod service;
pub mod slots;
pub mod store;

pub use compare::{Comparison, FieldDiff, compare};
pub use registry::{RestoreHandler, RestoreRegistry};
pub use service::{Capture, UndoOutcome, UndoService};
pub use slots::{SlotStore, UndoMeta, UndoSlot};
pub use store::ChangeLogStore;
