//! The `auth_token` cookie contract.
//!
//! Issued after a successful login or registration with a seven day
//! lifetime; overwritten with an already-expired copy when the session is
//! rejected or the user logs out. Both always use `Path=/` so the browser
//! treats them as the same cookie.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Name of the session cookie.
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Path the session cookie is scoped to.
pub const AUTH_COOKIE_PATH: &str = "/";

/// Lifetime of a freshly issued session cookie.
pub const AUTH_COOKIE_LIFETIME: Duration = Duration::days(7);

/// Build the cookie that stores a freshly issued token.
#[must_use]
pub fn issue_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, token))
        .path(AUTH_COOKIE_PATH)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(AUTH_COOKIE_LIFETIME)
        .build()
}

/// Build the cookie that deletes the session token.
#[must_use]
pub fn clear_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((AUTH_COOKIE_NAME, ""))
        .path(AUTH_COOKIE_PATH)
        .build();
    // Sets Max-Age=0 and an expiry date in the past.
    cookie.make_removal();
    cookie
}

/// Read the session token from request headers.
///
/// An empty cookie value counts as no token at all.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE_NAME)
        .map(Cookie::value)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
