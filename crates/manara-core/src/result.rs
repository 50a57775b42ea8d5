//! Convenience result type alias for Manara.

use crate::error::AppError;

/// A specialized `Result` type for Manara operations.
pub type AppResult<T> = Result<T, AppError>;
