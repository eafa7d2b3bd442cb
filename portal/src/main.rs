use std::net::SocketAddr;
use std::sync::Arc;

use portal::api::AuthApiClient;
use portal::config::ServerConfig;
use portal::time::SystemTimeSource;
use portal::{AppState, app};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: listen_port={}, auth_api_url={}, cookie_secure={}",
        config.listen_port,
        config.auth_api_url,
        config.cookie_secure
    );

    let auth_api = match AuthApiClient::new(&config.auth_api_url) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create authentication API client: {e}");
            std::process::exit(1);
        }
    };

    let listen_port = config.listen_port;
    let state = AppState::new(config, auth_api, Arc::new(SystemTimeSource));
    let app = app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], listen_port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
