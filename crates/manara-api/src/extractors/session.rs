//! `AdminSession` extractor: reads the identity forwarded by the
//! authenticating layer and injects a request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use manara_core::error::AppError;
use manara_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin context available in handlers.
#[derive(Debug, Clone)]
pub struct AdminSession(pub RequestContext);

impl AdminSession {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AdminSession {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let headers = &state.config.session;
        let user_id = uuid_header(parts, &headers.user_header)?;
        let session_id = uuid_header(parts, &headers.session_header)?;
        Ok(AdminSession(RequestContext::new(user_id, session_id)))
    }
}

fn uuid_header(parts: &Parts, name: &str) -> Result<Uuid, AppError> {
    let raw = parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication(format!("Missing {name} header")))?;
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::authentication(format!("Invalid {name} header")))
}
