//! HTTP client for the remote authentication API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ApiError, Credentials, NewUser};

const LOGIN_ENDPOINT: &str = "/authentication/login";
const CREATE_USER_ENDPOINT: &str = "/user/create";
const CREATE_USER_OK: &str = "ok";
const DEFAULT_CREATE_USER_FAILURE: &str = "Failed to create user";

const REQUEST_TIMEOUT_SECS: u64 = 15;
const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateUserResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the authentication API. Cheap to clone; clones share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct AuthApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthApiClient {
    /// Create a client for the API at `base_url`.
    ///
    /// # Errors
    /// Returns `ApiError::HttpClientBuild` if the TLS backend cannot be initialised.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    /// Returns `ApiError::MissingToken` when the API answers without a
    /// non-empty token, which is how it reports rejected credentials.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response: LoginResponse = self.post_json(LOGIN_ENDPOINT, credentials).await?;

        response
            .token
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingToken)
    }

    /// Create a user account.
    ///
    /// # Errors
    /// Returns `ApiError::Rejected` carrying the API's message when it is
    /// anything other than `"ok"`.
    pub async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        let response: CreateUserResponse = self.post_json(CREATE_USER_ENDPOINT, user).await?;

        match response.message.as_deref() {
            Some(CREATE_USER_OK) => Ok(()),
            Some(message) if !message.is_empty() => Err(ApiError::Rejected(message.to_string())),
            _ => Err(ApiError::Rejected(DEFAULT_CREATE_USER_FAILURE.to_string())),
        }
    }

    /// POST `body` as JSON and decode the JSON answer.
    ///
    /// The HTTP status is not inspected: the API reports failures in the
    /// body, so the body decides.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "calling authentication API");

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        response
            .json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("status {}: {e}", status.as_u16())))
    }
}
