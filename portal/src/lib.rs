// Life of a navigation request:
// 1. Request comes in
// 2. Bypass paths (/api, build assets, metadata files) skip straight to routing
// 3. Everything else goes through the session gate:
//     - Public pages (/login, /sign-up) pass untouched
//     - Otherwise the auth_token cookie is decoded (signature not checked)
//     - Missing, malformed or expired tokens redirect to /login,
//       clearing the cookie when there was one to clear
//     - A valid token on / redirects to /home
// 4. Allowed requests reach the handler with the decoded SessionContext
//
// Login and registration go through /api/auth/*, which proxy to the remote
// authentication API and store the issued token in the cookie.

pub mod api;
pub mod auth;
pub mod config;
pub mod gate;
pub mod routes;
pub mod state;
pub mod time;
pub mod validation;

#[cfg(test)]
mod e2e_tests;

pub use routes::app;
pub use state::AppState;
