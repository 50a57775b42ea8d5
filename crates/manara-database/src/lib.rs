//! # manara-database
//!
//! PostgreSQL connection management, the migration runner, and concrete
//! repositories for the change log and every tracked record table.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::SnapshotRepositories;
