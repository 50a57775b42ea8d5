//! Typed path parameter helpers.

use uuid::Uuid;

use manara_core::error::AppError;
use manara_core::types::ModelType;

/// Parses a UUID from a path segment.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::validation(format!("Invalid UUID: {s}")))
}

/// Parses a model type tag from a path segment.
pub fn parse_model_type(s: &str) -> Result<ModelType, AppError> {
    s.parse()
}
