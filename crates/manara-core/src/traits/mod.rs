//! Core traits defined in `manara-core` and implemented by other crates.

pub mod cache;
pub mod snapshot;

pub use cache::CacheProvider;
pub use snapshot::SnapshotRepository;
