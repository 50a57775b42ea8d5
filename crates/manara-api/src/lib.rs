//! # manara-api
//!
//! HTTP API for the Manara admin undo subsystem, built on Axum.
//!
//! Provides the tracked record endpoints, the one-click undo endpoints,
//! the change-log screens' endpoints, middleware (logging, CORS), the
//! admin session extractor, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
