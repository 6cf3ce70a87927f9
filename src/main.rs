// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::home_assistant::HomeAssistantClient;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Arc::new(load_config()?);

    // Create repository (infrastructure layer)
    let repository = Arc::new(HomeAssistantClient::new(
        config.ha_url.clone(),
        config.ha_token.clone(),
    )?);

    // Create service (application layer)
    let dashboard_service = DashboardService::new(repository, config.clone());

    let state = Arc::new(AppState { dashboard_service });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        "Starting power-terminal on {} ({}x{}, {} mode, tz {})",
        addr,
        config.display.width,
        config.display.height,
        config.display.mode.as_str(),
        config.timezone
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
