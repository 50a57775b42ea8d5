//! Response DTOs.

use serde::{Deserialize, Serialize};

use manara_core::types::Snapshot;
use manara_service::UndoMeta;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A record as shown on its admin edit page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResponse {
    pub model_type: String,
    pub id: Option<i64>,
    pub record: Snapshot,
    /// Present when the session can undo its last change to this record.
    pub undo: Option<UndoMeta>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Cache backend in use.
    pub cache: String,
    /// Whether the cache answered its health probe.
    pub cache_healthy: bool,
}
