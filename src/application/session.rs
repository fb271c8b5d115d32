// Dashboard session - owns every controller and the view they share
use crate::application::autocomplete::{AutocompleteController, SearchSettings};
use crate::application::history_chart::HistoryChartController;
use crate::application::map_controller::{MapController, MapSettings};
use crate::application::ports::{Geocoder, SensorBackend, WeatherProvider};
use crate::application::sensor_poller::SensorPoller;
use crate::application::simulation::SimulationToggle;
use crate::application::view::ViewStore;
use crate::application::weather_service::WeatherService;
use crate::domain::coordinate::{Coordinate, CoordinateError};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub map: MapSettings,
    pub search: SearchSettings,
    pub sensor_interval: Duration,
    pub history_interval: Duration,
}

pub struct Ports {
    pub backend: Arc<dyn SensorBackend>,
    pub weather: Arc<dyn WeatherProvider>,
    pub geocoder: Arc<dyn Geocoder>,
}

pub struct DashboardSession {
    pub view: Arc<ViewStore>,
    pub map: MapController,
    pub weather: WeatherService,
    pub autocomplete: AutocompleteController,
    pub sensor: Arc<SensorPoller>,
    pub chart: Arc<HistoryChartController>,
    pub simulation: SimulationToggle,
    sensor_interval: Duration,
    history_interval: Duration,
}

impl DashboardSession {
    pub fn new(settings: SessionSettings, ports: Ports) -> Self {
        let view = Arc::new(ViewStore::default());
        let weather = WeatherService::new(view.clone(), ports.weather, ports.geocoder.clone());
        let map = MapController::new(view.clone(), weather.clone(), settings.map);
        let autocomplete = AutocompleteController::new(
            view.clone(),
            ports.geocoder,
            map.clone(),
            weather.clone(),
            settings.search,
        );
        let sensor = Arc::new(SensorPoller::new(view.clone(), ports.backend.clone()));
        let chart = Arc::new(HistoryChartController::new(view.clone(), ports.backend.clone()));
        let simulation = SimulationToggle::new(view.clone(), ports.backend);

        Self {
            view,
            map,
            weather,
            autocomplete,
            sensor,
            chart,
            simulation,
            sensor_interval: settings.sensor_interval,
            history_interval: settings.history_interval,
        }
    }

    /// Map first, then the chart, then one weather lookup for whatever the
    /// coordinate inputs hold, then the two pollers.
    pub fn start(self: &Arc<Self>) -> Vec<JoinHandle<()>> {
        self.map.initialize();
        self.chart.initialize();

        let (latitude, longitude) = self
            .view
            .read(|view| (view.coordinates.latitude.clone(), view.coordinates.longitude.clone()));
        let session = self.clone();
        let initial_lookup = tokio::spawn(async move {
            if let Err(e) = session.search_from_input(&latitude, &longitude).await {
                tracing::warn!("Skipping initial weather lookup: {}", e);
            }
        });

        tracing::info!(
            "Polling sensor every {:?}, history every {:?}",
            self.sensor_interval,
            self.history_interval
        );
        vec![
            initial_lookup,
            tokio::spawn(self.sensor.clone().run(self.sensor_interval)),
            tokio::spawn(self.chart.clone().run(self.history_interval)),
        ]
    }

    /// Look up the coordinate typed into the inputs: recenter the map on it,
    /// move the marker and fetch its weather. Nothing happens unless both
    /// inputs hold numbers.
    pub async fn search_from_input(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<Coordinate, CoordinateError> {
        let at = self.locate_input(latitude, longitude)?;
        self.weather.fetch_weather(at).await;
        Ok(at)
    }

    /// The synchronous half of [`Self::search_from_input`]: validation and
    /// map movement, without the weather lookup.
    pub fn locate_input(&self, latitude: &str, longitude: &str) -> Result<Coordinate, CoordinateError> {
        let at = Coordinate::parse(latitude, longitude)?;
        self.view.update(|view| {
            view.coordinates.latitude = latitude.trim().to_string();
            view.coordinates.longitude = longitude.trim().to_string();
        });
        self.map.center_on(at);
        Ok(at)
    }
}
