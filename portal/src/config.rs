//! Server configuration module.
//!
//! This module provides configuration loading for the portal from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `PORTAL_LISTEN_PORT`: Port to listen on (default: `3000`)
//! - `PORTAL_AUTH_API_URL`: Base URL of the remote authentication API
//!   (default: `http://localhost:3003`)
//! - `PORTAL_COOKIE_SECURE`: Mark the session cookie `Secure` (default: `false`)
//!
//! # Invariants
//!
//! - `listen_port` is always a valid port number
//! - `auth_api_url` is an `http://` or `https://` URL without a trailing slash

/// Server configuration.
///
/// # Post-conditions
///
/// When constructed via `from_env()`, every field has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to listen on for HTTP connections.
    pub listen_port: u16,
    /// Base URL of the remote authentication API, e.g. `https://api.example.com`.
    pub auth_api_url: String,
    /// Whether the `auth_token` cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_port: Self::DEFAULT_PORT,
            auth_api_url: Self::DEFAULT_AUTH_API_URL.to_string(),
            cookie_secure: false,
        }
    }
}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default remote authentication API.
    pub const DEFAULT_AUTH_API_URL: &'static str = "http://localhost:3003";

    const LISTEN_PORT_VAR: &'static str = "PORTAL_LISTEN_PORT";
    const AUTH_API_URL_VAR: &'static str = "PORTAL_AUTH_API_URL";
    const COOKIE_SECURE_VAR: &'static str = "PORTAL_COOKIE_SECURE";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `PORTAL_LISTEN_PORT` is set but not a valid port number
    /// - `PORTAL_AUTH_API_URL` is set but empty or not an http(s) URL
    /// - `PORTAL_COOKIE_SECURE` is set but not a recognised boolean
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_port = Self::load_listen_port(lookup(Self::LISTEN_PORT_VAR))?;
        let auth_api_url = Self::load_auth_api_url(lookup(Self::AUTH_API_URL_VAR))?;
        let cookie_secure = Self::load_cookie_secure(lookup(Self::COOKIE_SECURE_VAR))?;

        Ok(Self {
            listen_port,
            auth_api_url,
            cookie_secure,
        })
    }

    /// Parse the listen port, defaulting when unset.
    fn load_listen_port(value: Option<String>) -> Result<u16, ConfigError> {
        let Some(value) = value else {
            return Ok(Self::DEFAULT_PORT);
        };

        match value.parse::<u16>() {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(ConfigError::InvalidValue {
                name: Self::LISTEN_PORT_VAR.to_string(),
                message: format!("'{value}' is not a valid port number (must be 1-65535)"),
            }),
        }
    }

    /// Validate the API base URL, defaulting when unset.
    fn load_auth_api_url(value: Option<String>) -> Result<String, ConfigError> {
        let Some(value) = value else {
            return Ok(Self::DEFAULT_AUTH_API_URL.to_string());
        };

        let trimmed = value.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: Self::AUTH_API_URL_VAR.to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                name: Self::AUTH_API_URL_VAR.to_string(),
                message: format!("'{trimmed}' must start with http:// or https://"),
            });
        }

        Ok(trimmed.to_string())
    }

    fn load_cookie_secure(value: Option<String>) -> Result<bool, ConfigError> {
        let Some(value) = value else {
            return Ok(false);
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                name: Self::COOKIE_SECURE_VAR.to_string(),
                message: format!("'{value}' is not a boolean"),
            }),
        }
    }
}
