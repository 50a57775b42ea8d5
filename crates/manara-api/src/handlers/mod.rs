//! Request handlers, grouped by admin screen.

pub mod change_logs;
pub mod health;
pub mod records;
pub mod undo;
