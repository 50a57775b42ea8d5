//! Admin session configuration.

use serde::{Deserialize, Serialize};

/// How the API identifies the acting admin and their session.
///
/// Authentication itself happens upstream; the authenticating layer
/// forwards the resolved identifiers in these headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Header carrying the authenticated user's UUID.
    #[serde(default = "default_user_header")]
    pub user_header: String,
    /// Header carrying the session UUID that scopes undo slots.
    #[serde(default = "default_session_header")]
    pub session_header: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
            session_header: default_session_header(),
        }
    }
}

fn default_user_header() -> String {
    "x-user-id".to_string()
}

fn default_session_header() -> String {
    "x-session-id".to_string()
}
