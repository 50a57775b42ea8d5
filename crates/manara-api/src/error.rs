//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use manara_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status and error code for the wrapped error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self.0.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::UnknownModelType => (StatusCode::BAD_REQUEST, "UNKNOWN_MODEL_TYPE"),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::NothingToRestore => (StatusCode::NOT_FOUND, "NO_UNDO_STATE"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::RestoreFailed => (StatusCode::INTERNAL_SERVER_ERROR, "RESTORE_FAILED"),
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Cache
            | ErrorKind::Configuration
            | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        if self.0.kind.is_infrastructure() {
            tracing::error!(kind = %self.0.kind, error = %self.0, source = ?self.0.source, "Request failed");
        } else if status.is_server_error() {
            tracing::warn!(kind = %self.0.kind, error = %self.0, "Request failed");
        }

        let body = ApiErrorResponse {
            success: false,
            error: error_code.to_string(),
            message: self.0.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_error_codes() {
        let cases = [
            (AppError::unknown_model_type("x"), StatusCode::BAD_REQUEST, "UNKNOWN_MODEL_TYPE"),
            (AppError::nothing_to_restore("x"), StatusCode::NOT_FOUND, "NO_UNDO_STATE"),
            (AppError::conflict("x"), StatusCode::CONFLICT, "CONFLICT"),
            (AppError::restore_failed("x"), StatusCode::INTERNAL_SERVER_ERROR, "RESTORE_FAILED"),
            (AppError::database("x"), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            assert_eq!(ApiError(err).status_and_code(), (status, code));
        }
    }
}
