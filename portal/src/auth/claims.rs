//! Unverified JWT claim decoding.
//!
//! The session gate only needs to know whether a token *looks* like a live
//! session: that it is a well-formed JWT whose payload carries an `exp` in
//! the future. The signature is deliberately not checked here. The remote
//! API verifies the token on every privileged call; this layer only decides
//! where to send the browser.
//!
//! # Post-conditions
//! - On success, returns the claims parsed from the payload segment.
//! - On failure, returns a `ClaimsError` describing which part was malformed.
//!
//! # Invariants
//! - Decoding is pure: no I/O, no shared state, same input gives same output.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Claims read from a session token payload.
///
/// Only `exp` influences gating. `id`/`sub` and `role` are carried through
/// to the [`SessionContext`](super::SessionContext) for page handlers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionClaims {
    /// Expiration time, seconds since Unix epoch. Fractional values are allowed.
    #[serde(default)]
    pub exp: Option<f64>,
    /// Application user identifier, as issued by the authentication API.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Standard subject claim, used when `id` is absent.
    #[serde(default, deserialize_with = "lenient_string")]
    pub sub: Option<String>,
    /// User role.
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,
}

impl SessionClaims {
    /// Returns `true` if the token is expired at `now_ms`.
    ///
    /// A missing or non-finite `exp` counts as expired, and so does the
    /// exact expiry instant.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Sub-millisecond precision is irrelevant here
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.exp {
            Some(exp) if exp.is_finite() => exp * 1000.0 <= now_ms as f64,
            _ => true,
        }
    }

    /// The user identifier: `id` if present, otherwise `sub`.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.sub.as_deref())
    }
}

/// Error returned when a token cannot be decoded into claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    /// The token is not three dot-separated segments.
    MalformedToken,
    /// The header segment is not base64url-encoded JSON object.
    InvalidHeader(String),
    /// The payload segment is not base64url-encoded JSON claims.
    InvalidPayload(String),
}

impl std::fmt::Display for ClaimsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedToken => write!(f, "malformed JWT"),
            Self::InvalidHeader(reason) => write!(f, "invalid JWT header: {reason}"),
            Self::InvalidPayload(reason) => write!(f, "invalid JWT payload: {reason}"),
        }
    }
}

impl std::error::Error for ClaimsError {}

/// Decodes the claims of a JWT without verifying its signature.
///
/// # Errors
/// Returns `ClaimsError` if the token is not three segments, if its header
/// is not a base64url JSON object, or if its payload is not a JSON object of
/// the expected claim types.
pub fn decode_claims(token: &str) -> Result<SessionClaims, ClaimsError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(ClaimsError::MalformedToken);
    };

    // Any signing algorithm is fine here, only the shape of the header matters.
    decode_segment(header).map_err(ClaimsError::InvalidHeader)?;
    let claims = decode_segment(payload).map_err(ClaimsError::InvalidPayload)?;

    SessionClaims::deserialize(Value::Object(claims))
        .map_err(|e| ClaimsError::InvalidPayload(e.to_string()))
}

/// Decodes one base64url segment into a JSON object.
fn decode_segment(segment: &str) -> Result<Map<String, Value>, String> {
    // Some issuers keep base64 padding on the segments.
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| e.to_string())?;

    match serde_json::from_slice(&bytes).map_err(|e| e.to_string())? {
        Value::Object(object) => Ok(object),
        other => Err(format!("expected a JSON object, found {other}")),
    }
}

/// Accepts a string or a number, ignores any other JSON type.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
