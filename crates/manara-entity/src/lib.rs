//! # manara-entity
//!
//! Row models for Manara CMS. Every struct in this crate represents a
//! database table row or a value object derived from one. Database rows
//! derive `sqlx::FromRow`; tracked records additionally implement
//! [`record::Trackable`] so the undo subsystem can snapshot them.

pub mod change_log;
pub mod record;
