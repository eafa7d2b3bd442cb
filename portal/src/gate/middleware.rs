//! Axum layer that runs the session gate in front of the router.
//!
//! Bypass paths go straight to the inner service. Everything else is
//! evaluated; redirects are answered here and never reach a handler.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::{GateDecision, HOME_PATH, LOGIN_PATH};
use crate::auth::{clear_cookie, token_from_headers};
use crate::state::AppState;

/// Gate every navigation request.
///
/// Install with `axum::middleware::from_fn_with_state`.
pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    if state.gate.routes().is_bypassed(&path) {
        return next.run(request).await;
    }

    let token = token_from_headers(request.headers());
    let decision = state
        .gate
        .evaluate(&path, token.as_deref(), state.clock.now_ms());

    match decision {
        GateDecision::Allow { session } => {
            if let Some(session) = session {
                request.extensions_mut().insert(session);
            }
            next.run(request).await
        }
        GateDecision::RedirectToLogin { clear_cookie: true } => {
            let jar = CookieJar::new().add(clear_cookie());
            (jar, Redirect::temporary(LOGIN_PATH)).into_response()
        }
        GateDecision::RedirectToLogin {
            clear_cookie: false,
        } => Redirect::temporary(LOGIN_PATH).into_response(),
        GateDecision::RedirectToHome => Redirect::temporary(HOME_PATH).into_response(),
    }
}
