//! Session token handling.
//!
//! This module covers everything the portal does with the `auth_token`
//! cookie: reading it, decoding its claims, and issuing or clearing it.
//!
//! # Invariants
//! - The portal never mints tokens. It stores what the remote API issues.
//! - Claims are decoded without signature verification and are advisory only.

pub mod claims;
pub mod cookie;
pub mod session;

pub use claims::{ClaimsError, SessionClaims, decode_claims};
pub use cookie::{AUTH_COOKIE_NAME, clear_cookie, issue_cookie, token_from_headers};
pub use session::SessionContext;
