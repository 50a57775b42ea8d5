//! Change-log browsing, revert, and purge.

pub mod service;
pub mod view;

pub use service::{ChangeLogService, RevertOutcome};
pub use view::ChangeLogView;
