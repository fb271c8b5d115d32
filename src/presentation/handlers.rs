// HTTP request handlers
use crate::application::autocomplete::ClickTarget;
use crate::application::sensor_poller::PollerHealth;
use crate::domain::coordinate::Coordinate;
use crate::infrastructure::chunked_stream::stream_response;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct MapClick {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw text of the coordinate inputs
#[derive(Debug, Deserialize)]
pub struct CoordinateInput {
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PageClick {
    pub target: ClickTarget,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SimulationSwitch {
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct SimulationState {
    pub checked: bool,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current view of the dashboard
pub async fn get_view(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let view = state.session.view.snapshot();
    match json_response(&view, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Current view, then one chunk per change for as long as the client stays
pub async fn stream_view(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    stream_response(state.session.view.updates(), accepts_brotli(&headers))
}

pub async fn diagnostics(State(state): State<Arc<AppState>>) -> Json<PollerHealth> {
    Json(state.session.sensor.health())
}

pub async fn map_click(
    State(state): State<Arc<AppState>>,
    Json(click): Json<MapClick>,
) -> StatusCode {
    // The weather lookup finishes on its own; the marker has already moved.
    drop(
        state
            .session
            .map
            .on_map_click(Coordinate::new(click.latitude, click.longitude)),
    );
    StatusCode::ACCEPTED
}

pub async fn toggle_map(State(state): State<Arc<AppState>>) -> StatusCode {
    // The resize task runs on its own; nothing waits for it.
    drop(state.session.map.toggle_visibility());
    StatusCode::ACCEPTED
}

pub async fn submit_coordinates(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CoordinateInput>,
) -> impl IntoResponse {
    let session = state.session.clone();
    match session.locate_input(&input.latitude, &input.longitude) {
        Ok(at) => {
            tokio::spawn(async move { session.weather.fetch_weather(at).await });
            StatusCode::ACCEPTED.into_response()
        }
        Err(e) => {
            tracing::debug!("Rejected coordinate input: {}", e);
            (StatusCode::BAD_REQUEST, e.prompt()).into_response()
        }
    }
}

pub async fn search_input(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SearchInput>,
) -> StatusCode {
    state.session.autocomplete.on_input(&input.text);
    StatusCode::ACCEPTED
}

pub async fn select_suggestion(
    Path(index): Path<usize>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    match state.session.autocomplete.select(index) {
        Some(_lookup) => StatusCode::ACCEPTED,
        None => StatusCode::NOT_FOUND,
    }
}

pub async fn page_click(
    State(state): State<Arc<AppState>>,
    Json(click): Json<PageClick>,
) -> StatusCode {
    state.session.autocomplete.on_click(click.target);
    StatusCode::NO_CONTENT
}

/// Flip the simulator; answers with the switch state once the backend
/// request has settled.
pub async fn toggle_simulation(
    State(state): State<Arc<AppState>>,
    Json(switch): Json<SimulationSwitch>,
) -> Json<SimulationState> {
    let checked = state.session.simulation.toggle(switch.active).await;
    Json(SimulationState { checked })
}
