//! Shared application state.
//!
//! Everything here is immutable after startup. Cloning is cheap: the config
//! and clock are behind `Arc`s and the API client shares its connection pool.

use std::sync::Arc;

use crate::api::AuthApiClient;
use crate::config::ServerConfig;
use crate::gate::SessionGate;
use crate::time::TimeSource;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub gate: SessionGate,
    pub auth_api: AuthApiClient,
    pub clock: Arc<dyn TimeSource>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, auth_api: AuthApiClient, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            config: Arc::new(config),
            gate: SessionGate::default(),
            auth_api,
            clock,
        }
    }
}
