//! Session gate.
//!
//! Runs once per navigation request, before any page handler, and decides
//! whether the request may proceed.
//!
//! # Decision order
//! 1. Public route (exact match) → allow, token not inspected.
//! 2. No token → redirect to login, nothing to clear.
//! 3. Token not decodable → redirect to login and clear the cookie.
//! 4. `exp` missing or not in the future → redirect to login and clear the cookie.
//! 5. Valid token on `/` → redirect to home.
//! 6. Otherwise → allow.
//!
//! # Invariants
//! - Evaluation is pure: same path, token and instant give the same decision.
//! - A protected path never yields `Allow` without a decodable, unexpired token.
//! - A rejected malformed or expired token is always cleared.
//! - Infrastructure paths (see [`RouteTable::is_bypassed`]) are filtered out
//!   by the middleware before evaluation and are never classified.

pub mod middleware;

pub use middleware::session_gate;

use crate::auth::{SessionClaims, SessionContext, decode_claims};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";
/// Path of the registration page.
pub const SIGN_UP_PATH: &str = "/sign-up";
/// Landing page for signed-in users.
pub const HOME_PATH: &str = "/home";
/// Site root.
pub const ROOT_PATH: &str = "/";

/// Paths reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &[LOGIN_PATH, SIGN_UP_PATH];

/// Infrastructure paths that skip the gate entirely: the API namespace,
/// build assets and static metadata files.
pub const BYPASS_PREFIXES: &[&str] = &[
    "/api",
    "/_next/static",
    "/_next/image",
    "/favicon.ico",
    "/sitemap.xml",
    "/robots.txt",
];

/// Static route classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTable {
    public_routes: &'static [&'static str],
    bypass_prefixes: &'static [&'static str],
}

impl RouteTable {
    #[must_use]
    pub const fn new(
        public_routes: &'static [&'static str],
        bypass_prefixes: &'static [&'static str],
    ) -> Self {
        Self {
            public_routes,
            bypass_prefixes,
        }
    }

    /// Exact match against the public route list.
    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        self.public_routes.contains(&path)
    }

    /// Returns `true` if `path` is one of the bypass prefixes or lies
    /// beneath one. Matching is per path segment, so `/api` covers
    /// `/api/auth/login` but not `/apiary`.
    #[must_use]
    pub fn is_bypassed(&self, path: &str) -> bool {
        self.bypass_prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(PUBLIC_ROUTES, BYPASS_PREFIXES)
    }
}

/// What the gate found in the `auth_token` cookie.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenStatus {
    /// No cookie, or an empty one.
    Missing,
    /// The value is not a decodable JWT.
    Malformed,
    /// Decodable, but `exp` is absent or not in the future.
    Expired,
    /// Decodable and unexpired.
    Valid(SessionClaims),
}

impl TokenStatus {
    /// Classify a token at the instant `now_ms`.
    #[must_use]
    pub fn classify(token: Option<&str>, now_ms: u64) -> Self {
        let Some(token) = token else {
            return Self::Missing;
        };

        match decode_claims(token) {
            Ok(claims) if claims.is_expired_at(now_ms) => Self::Expired,
            Ok(claims) => Self::Valid(claims),
            Err(error) => {
                tracing::debug!("session token rejected: {error}");
                Self::Malformed
            }
        }
    }

    /// Short name for logging. Never includes the token itself.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::Expired => "expired",
            Self::Valid(_) => "valid",
        }
    }
}

/// Outcome of gating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through. `session` is set when a valid token was
    /// inspected; public routes pass without one.
    Allow { session: Option<SessionContext> },
    /// Send the browser to the login page, deleting the cookie if asked.
    RedirectToLogin { clear_cookie: bool },
    /// Send an already signed-in browser to its landing page.
    RedirectToHome,
}

/// The decision core of the gate. Stateless apart from its route table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGate {
    routes: RouteTable,
}

impl SessionGate {
    #[must_use]
    pub const fn new(routes: RouteTable) -> Self {
        Self { routes }
    }

    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide what to do with a request for `path` carrying `token` at `now_ms`.
    #[must_use]
    pub fn evaluate(&self, path: &str, token: Option<&str>, now_ms: u64) -> GateDecision {
        if self.routes.is_public(path) {
            return GateDecision::Allow { session: None };
        }

        let status = TokenStatus::classify(token, now_ms);
        let decision = match &status {
            TokenStatus::Missing => GateDecision::RedirectToLogin {
                clear_cookie: false,
            },
            TokenStatus::Malformed | TokenStatus::Expired => GateDecision::RedirectToLogin {
                clear_cookie: true,
            },
            TokenStatus::Valid(_) if path == ROOT_PATH => GateDecision::RedirectToHome,
            TokenStatus::Valid(claims) => GateDecision::Allow {
                session: Some(SessionContext::from(claims)),
            },
        };

        tracing::debug!(path, token = status.label(), ?decision, "session gate");
        decision
    }
}
