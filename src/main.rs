/// Main application entry point
mod aggregate;
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod prefs;
mod routes;
mod services;
mod utils;

use crate::clients::SpaceXGraphQlClient;
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::prefs::PrefsStore;
use crate::routes::build_router;
use crate::services::DashboardService;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize the display preference store
    let prefs_store = Arc::new(PrefsStore::open(&config.prefs_path));
    info!("Display preferences loaded from {}", config.prefs_path);

    // Initialize the upstream GraphQL client
    let client = SpaceXGraphQlClient::new(
        config.graphql_api_url.clone(),
        Duration::from_secs(config.http_timeout_seconds),
    )?;

    // Initialize the dashboard service
    let dashboard_service = Arc::new(DashboardService::new(client));

    // Initialize application state
    let state = AppState {
        dashboard_service,
        prefs_store,
    };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("launch_dashboard service listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
