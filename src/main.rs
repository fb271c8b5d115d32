// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::session::{DashboardSession, Ports};
use crate::infrastructure::backend_client::HttpSensorBackend;
use crate::infrastructure::config::load_config;
use crate::infrastructure::nominatim::NominatimClient;
use crate::infrastructure::open_meteo::OpenMeteoClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    diagnostics, get_view, health_check, map_click, page_click, search_input, select_suggestion,
    stream_view, submit_coordinates, toggle_map, toggle_simulation,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config().context("Failed to load dashboard configuration")?;
    let addr = config.bind_addr()?;

    // Create adapters (infrastructure layer)
    let http = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .build()
        .context("Failed to build HTTP client")?;
    let ports = Ports {
        backend: Arc::new(HttpSensorBackend::new(
            http.clone(),
            config.backend.base_url.clone(),
        )),
        weather: Arc::new(OpenMeteoClient::new(
            http.clone(),
            config.services.forecast_url.clone(),
        )),
        geocoder: Arc::new(NominatimClient::new(
            http,
            config.services.geocoder_url.clone(),
            config.services.user_agent.clone(),
        )),
    };

    // Create the session (application layer) and start its timers
    let session = Arc::new(DashboardSession::new(config.session_settings(), ports));
    let _tasks = session.start();

    let state = Arc::new(AppState { session });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/view", get(get_view))
        .route("/view/stream", get(stream_view))
        .route("/diagnostics", get(diagnostics))
        .route("/events/map-click", post(map_click))
        .route("/events/map-toggle", post(toggle_map))
        .route("/events/coordinates", post(submit_coordinates))
        .route("/events/search-input", post(search_input))
        .route("/events/suggestions/:index/select", post(select_suggestion))
        .route("/events/click", post(page_click))
        .route("/events/simulation", post(toggle_simulation))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    tracing::info!(
        "Starting garden-dashboard on {} (sensor backend {})",
        addr,
        config.backend.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
