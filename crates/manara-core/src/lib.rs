//! # manara-core
//!
//! Core crate for Manara CMS. Contains configuration schemas, the unified
//! error system, the snapshot and model-type vocabulary shared by the undo
//! subsystem, pagination types, and the traits implemented by the storage
//! and cache crates.
//!
//! This crate has **no** internal dependencies on other Manara crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
