//! Client for the remote authentication API.
//!
//! Two calls: credential login, which returns the bearer token, and user
//! creation. The API does not distinguish "bad credentials" from "server
//! error" in any structured way, so neither does [`ApiError`] beyond what
//! is needed to log it.

pub mod client;

pub use client::AuthApiClient;

use serde::{Deserialize, Serialize};

/// Status assigned to users created through the sign-up form.
pub const NEW_USER_STATUS: &str = "active";

/// Body of `POST /authentication/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /user/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub status: String,
}

/// Error returned by [`AuthApiClient`] calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    HttpClientBuild(String),
    /// The request could not be sent or the connection failed.
    Request(String),
    /// The response body was not the expected JSON.
    Decode(String),
    /// Login answered without a token.
    MissingToken,
    /// User creation answered with something other than `"ok"`.
    Rejected(String),
    /// Login answered with a token whose claims cannot be read.
    UndecodableToken(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClientBuild(reason) => write!(f, "failed to build HTTP client: {reason}"),
            Self::Request(reason) => {
                write!(f, "request to authentication API failed: {reason}")
            }
            Self::Decode(reason) => {
                write!(f, "unexpected response from authentication API: {reason}")
            }
            Self::MissingToken => write!(f, "Authentication failed. No token received."),
            Self::Rejected(message) => write!(f, "{message}"),
            Self::UndecodableToken(reason) => {
                write!(f, "Failed to decode user data from token: {reason}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Message safe to show in a form. Transport details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingToken | Self::Rejected(_) => self.to_string(),
            Self::UndecodableToken(_) => "Failed to decode user data from token.".to_string(),
            Self::HttpClientBuild(_) | Self::Request(_) | Self::Decode(_) => {
                "Authentication service unavailable. Please try again.".to_string()
            }
        }
    }
}
