//! Error type shared by every Manara crate.
//!
//! Each failure carries an [`ErrorKind`]; the HTTP layer maps kinds to
//! status codes and the CLI prints the message.

use std::fmt;
use thiserror::Error;

/// What went wrong, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Record or change-log entry does not exist.
    NotFound,
    /// Missing or malformed admin session headers.
    Authentication,
    /// Submitted data or query parameters are invalid.
    Validation,
    /// Entry already reverted, or a concurrent revert won.
    Conflict,
    /// The model type tag does not name a tracked entity kind.
    UnknownModelType,
    /// No change is available to undo for the requested record.
    NothingToRestore,
    /// A restore handler did not produce a usable landing URL.
    RestoreFailed,
    Internal,
    Database,
    Cache,
    Configuration,
    Serialization,
}

impl ErrorKind {
    /// Stable upper-case identifier used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Authentication => "AUTHENTICATION",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::UnknownModelType => "UNKNOWN_MODEL_TYPE",
            Self::NothingToRestore => "NOTHING_TO_RESTORE",
            Self::RestoreFailed => "RESTORE_FAILED",
            Self::Internal => "INTERNAL",
            Self::Database => "DATABASE",
            Self::Cache => "CACHE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
        }
    }

    /// Whether the failure originates in infrastructure rather than in
    /// the caller's request.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Internal | Self::Database | Self::Cache | Self::Configuration | Self::Serialization
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorized error with an optional underlying cause.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    pub kind: ErrorKind,
    /// Message safe to show to an administrator.
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a lower-level error, keeping it as the `source`.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn unknown_model_type(tag: &str) -> Self {
        Self::new(
            ErrorKind::UnknownModelType,
            format!("Unknown model type: '{tag}'"),
        )
    }

    pub fn nothing_to_restore(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NothingToRestore, message)
    }

    pub fn restore_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RestoreFailed, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

/// Clones drop the `source` chain.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, format!("Invalid JSON: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(ErrorKind::Configuration, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::unknown_model_type("newsletter");
        assert_eq!(
            err.to_string(),
            "UNKNOWN_MODEL_TYPE: Unknown model type: 'newsletter'"
        );
    }

    #[test]
    fn test_clone_drops_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Serialization);
        assert!(std::error::Error::source(&cloned).is_none());
    }

    #[test]
    fn test_infrastructure_kinds() {
        assert!(ErrorKind::Database.is_infrastructure());
        assert!(!ErrorKind::Conflict.is_infrastructure());
        assert!(!ErrorKind::RestoreFailed.is_infrastructure());
    }
}
