//! Custom Axum extractors.

pub mod pagination;
pub mod path;
pub mod session;

pub use pagination::PaginationParams;
pub use session::AdminSession;
