//! Per-request session context.
//!
//! The gate decodes the session token once and hands the result to page
//! handlers through request extensions. Handlers take a `SessionContext`
//! parameter; nothing reads session data from global state.

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use serde::Serialize;

use super::SessionClaims;

/// What the portal knows about the signed-in user.
///
/// Built from unverified claims, so it is display data only. Any
/// authorization decision belongs to the remote API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<&SessionClaims> for SessionContext {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            id: claims.user_id().map(str::to_owned),
            role: claims.role.clone(),
        }
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the gate allowed the request with a valid token.
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
