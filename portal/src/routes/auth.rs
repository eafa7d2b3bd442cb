//! Auth routes: login, registration, logout.
//!
//! Login and registration validate the form, call the remote API and, on
//! success, store the issued token in the `auth_token` cookie. The answer
//! tells the page where to go next.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::json;

use crate::api::{ApiError, Credentials, NEW_USER_STATUS, NewUser};
use crate::auth::{SessionContext, clear_cookie, decode_claims, issue_cookie};
use crate::gate::HOME_PATH;
use crate::state::AppState;
use crate::validation::{LoginForm, RegisterForm, ValidationErrors};

/// Successful sign-in answer.
#[derive(Debug, Serialize)]
pub struct SignedIn {
    pub redirect: &'static str,
    pub user: SessionContext,
}

/// Why a form submission failed.
#[derive(Debug)]
pub enum FormError {
    /// One or more fields broke a validation rule.
    Invalid(ValidationErrors),
    /// The authentication API refused or could not be reached.
    Api(ApiError),
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(errors) => {
                let body = json!({ "errors": errors });
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            Self::Api(error) => {
                let body = json!({ "form": error.user_message() });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}

impl From<ApiError> for FormError {
    fn from(error: ApiError) -> Self {
        tracing::warn!(error = %error, "authentication API call failed");
        Self::Api(error)
    }
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<(CookieJar, Json<SignedIn>), FormError> {
    form.validate()?;

    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };
    let token = state.auth_api.login(&credentials).await?;

    sign_in(&state, token)
}

/// `POST /api/auth/register`: create the account, then sign in with it.
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<(CookieJar, Json<SignedIn>), FormError> {
    form.validate()?;

    let user = NewUser {
        name: form.name.trim().to_string(),
        email: form.email,
        password: form.password,
        status: NEW_USER_STATUS.to_string(),
    };
    state.auth_api.create_user(&user).await?;
    tracing::info!("user account created");

    let credentials = Credentials {
        email: user.email,
        password: user.password,
    };
    let token = state.auth_api.login(&credentials).await?;

    sign_in(&state, token)
}

/// `POST /api/auth/logout`: clear the session cookie.
pub async fn logout() -> (CookieJar, StatusCode) {
    (CookieJar::new().add(clear_cookie()), StatusCode::NO_CONTENT)
}

/// Store `token` in the session cookie and describe the signed-in user.
///
/// A token the gate could not read is refused here, so no cookie is set.
fn sign_in(state: &AppState, token: String) -> Result<(CookieJar, Json<SignedIn>), FormError> {
    let claims =
        decode_claims(&token).map_err(|e| ApiError::UndecodableToken(e.to_string()))?;
    let user = SessionContext::from(&claims);
    tracing::info!(user_id = ?user.id, "session issued");

    let jar = CookieJar::new().add(issue_cookie(token, state.config.cookie_secure));
    Ok((
        jar,
        Json(SignedIn {
            redirect: HOME_PATH,
            user,
        }),
    ))
}
