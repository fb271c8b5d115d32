// Map viewport, marker and layout toggling
use crate::application::view::ViewStore;
use crate::application::weather_service::WeatherService;
use crate::domain::coordinate::Coordinate;
use crate::domain::map::{MapState, TileLayer};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct MapSettings {
    pub center: Coordinate,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    /// Time the layout transition needs before the map can be re-measured
    pub settle_delay: Duration,
}

#[derive(Clone)]
pub struct MapController {
    view: Arc<ViewStore>,
    weather: WeatherService,
    settings: MapSettings,
}

impl MapController {
    pub fn new(view: Arc<ViewStore>, weather: WeatherService, settings: MapSettings) -> Self {
        Self {
            view,
            weather,
            settings,
        }
    }

    /// Center the map on the default coordinate, attach the tile layer and
    /// place the marker. The coordinate inputs start out on the same point.
    pub fn initialize(&self) {
        let settings = &self.settings;
        self.view.update(|view| {
            view.map = MapState::new(settings.center, settings.zoom, settings.tile_layer.clone());
            view.coordinates.set(settings.center);
        });
        tracing::info!(
            "Map initialized at {} (zoom {})",
            settings.center,
            settings.zoom
        );
    }

    /// Move the marker to a clicked point without recentering and fill the
    /// coordinate inputs, then look up the weather there in the background.
    /// The marker keeps the exact point; the inputs and the lookup use the
    /// rounded one.
    pub fn on_map_click(&self, at: Coordinate) -> JoinHandle<()> {
        let rounded = at.rounded();
        self.view.update(|view| {
            view.coordinates.set(rounded);
            view.map.move_marker(at);
        });

        let weather = self.weather.clone();
        tokio::spawn(async move { weather.fetch_weather(rounded).await })
    }

    /// Recenter on `at` at the configured zoom and move the marker there
    pub fn center_on(&self, at: Coordinate) {
        let zoom = self.settings.zoom;
        self.view.update(|view| {
            view.map.set_view(at, zoom);
            view.map.move_marker(at);
        });
    }

    /// Flip the map layout, then re-measure once the transition has settled.
    /// The map caches its viewport size and draws wrongly if it was resized
    /// while hidden.
    pub fn toggle_visibility(&self) -> JoinHandle<()> {
        self.view.update(|view| view.map.active = !view.map.active);

        let view = self.view.clone();
        let delay = self.settings.settle_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.update(|view| view.map.invalidate_size());
        })
    }
}
