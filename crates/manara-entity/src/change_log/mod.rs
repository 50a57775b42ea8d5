//! Change-log domain entities.

pub mod action;
pub mod filter;
pub mod model;

pub use action::ChangeAction;
pub use filter::{ChangeLogFilter, ChangeState};
pub use model::{ChangeLogEntry, CreateChangeLogEntry};
