//! Request context carrying the acting user and session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current admin request.
///
/// Built by the API extractor and passed into service methods so that
/// every operation knows *who* is acting and from *which* session. The
/// session id scopes the undo slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID; `None` for system-initiated actions.
    pub user_id: Option<Uuid>,
    /// The current session ID.
    pub session_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for an authenticated admin.
    pub fn new(user_id: Uuid, session_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            session_id,
            request_time: Utc::now(),
        }
    }

    /// Creates a context for maintenance tasks run outside a browser session
    /// (CLI revert, retention purge). Such actions have no user and use a
    /// throwaway session, so they never touch a real admin's undo slots.
    pub fn system() -> Self {
        Self {
            user_id: None,
            session_id: Uuid::new_v4(),
            request_time: Utc::now(),
        }
    }
}
