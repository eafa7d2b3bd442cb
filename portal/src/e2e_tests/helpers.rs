//! Common helpers for end-to-end tests.

use std::sync::Arc;

use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::{RequestBuilder, Response};

use crate::api::AuthApiClient;
use crate::config::ServerConfig;
use crate::state::AppState;
use crate::testing::{FakeAuthApi, TEST_NOW_MS};
use crate::time::{FixedTimeSource, TimeSource};

/// A portal wired to a fake authentication API, both on ephemeral ports.
///
/// The portal's clock is frozen at [`TEST_NOW_MS`] until a test moves it.
pub struct TestPortal {
    pub base_url: String,
    pub api: FakeAuthApi,
    pub clock: Arc<FixedTimeSource>,
    http: reqwest::Client,
}

impl TestPortal {
    #[allow(clippy::expect_used)]
    pub async fn spawn() -> Self {
        let api = FakeAuthApi::spawn().await;
        let clock = Arc::new(FixedTimeSource::new(TEST_NOW_MS));

        let config = ServerConfig {
            auth_api_url: api.base_url.clone(),
            ..ServerConfig::default()
        };
        let auth_api =
            AuthApiClient::new(&config.auth_api_url).expect("Failed to build API client");
        let portal_clock: Arc<dyn TimeSource> = Arc::clone(&clock) as Arc<dyn TimeSource>;
        let state = AppState::new(config, auth_api, portal_clock);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind portal");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = crate::app(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        // Redirects are what most tests assert on, so never follow them.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build test client");

        Self {
            base_url: format!("http://{addr}"),
            api,
            clock,
            http,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(format!("{}{path}", self.base_url))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(format!("{}{path}", self.base_url))
    }

    /// `GET path` presenting `token` as the session cookie.
    #[allow(clippy::expect_used)]
    pub async fn get_with_token(&self, path: &str, token: &str) -> Response {
        self.get(path)
            .header(COOKIE, format!("auth_token={token}"))
            .send()
            .await
            .expect("request failed")
    }

    /// `GET path` without any cookie.
    #[allow(clippy::expect_used)]
    pub async fn get_anonymous(&self, path: &str) -> Response {
        self.get(path).send().await.expect("request failed")
    }

    /// `POST path` with a JSON body.
    #[allow(clippy::expect_used)]
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> Response {
        self.post(path)
            .json(body)
            .send()
            .await
            .expect("request failed")
    }
}

/// The `Location` header of a redirect.
pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// The `Set-Cookie` header for `auth_token`, if the response set one.
pub fn auth_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("auth_token="))
        .map(str::to_owned)
}

/// The token value carried by an `auth_token` `Set-Cookie` header.
pub fn cookie_value(set_cookie: &str) -> &str {
    set_cookie
        .trim_start_matches("auth_token=")
        .split(';')
        .next()
        .unwrap_or_default()
}

/// Assert the response deletes the session cookie.
#[allow(clippy::expect_used)]
pub fn assert_clears_cookie(response: &Response) {
    let cookie = auth_cookie(response).expect("expected auth_token to be cleared");
    assert_eq!(cookie_value(&cookie), "");
    assert!(cookie.contains("Max-Age=0"), "not expired: {cookie}");
    assert!(cookie.contains("Path=/"), "wrong path: {cookie}");
}
