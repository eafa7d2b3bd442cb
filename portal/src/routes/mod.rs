//! Router assembly.
//!
//! Every route, the fallback included, sits behind the session gate. API
//! routes live under `/api`, which the gate lets through untouched; they do
//! their own checks.

pub mod auth;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};

use crate::gate::{HOME_PATH, LOGIN_PATH, SIGN_UP_PATH, session_gate};
use crate::state::AppState;

/// Build the portal router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(LOGIN_PATH, get(pages::login_page))
        .route(SIGN_UP_PATH, get(pages::sign_up_page))
        .route(HOME_PATH, get(pages::home))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/assets/forms.js", get(pages::forms_script))
        .route("/api/healthz", get(healthz))
        .fallback(not_found)
        // Added after the fallback so unknown paths are gated too.
        .layer(axum::middleware::from_fn_with_state(state.clone(), session_gate))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
