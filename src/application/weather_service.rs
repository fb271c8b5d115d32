// Weather and location lookups for the selected coordinate
use crate::application::ports::{Geocoder, WeatherProvider};
use crate::application::view::ViewStore;
use crate::domain::coordinate::Coordinate;
use crate::domain::weather::LocationLabel;
use std::sync::Arc;

#[derive(Clone)]
pub struct WeatherService {
    view: Arc<ViewStore>,
    provider: Arc<dyn WeatherProvider>,
    geocoder: Arc<dyn Geocoder>,
}

impl WeatherService {
    pub fn new(
        view: Arc<ViewStore>,
        provider: Arc<dyn WeatherProvider>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        Self {
            view,
            provider,
            geocoder,
        }
    }

    /// Refresh the weather panel for `at`, then its location label.
    /// A failed forecast leaves the panel exactly as it was.
    pub async fn fetch_weather(&self, at: Coordinate) {
        let snapshot = match self.provider.current_weather(at).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("Weather fetch for {} failed: {}", at, e);
                return;
            }
        };

        self.view.update(|view| {
            let panel = &mut view.weather;
            panel.temperature = Some(snapshot.temperature.to_string());
            panel.windspeed = Some(snapshot.windspeed.to_string());
            panel.wind_direction = Some(format!("{}°", snapshot.winddirection));
            panel.condition = Some(snapshot.description().to_string());
            panel.elevation = Some(format!("{} m", snapshot.elevation));
            panel.time = Some(snapshot.observed_clock());
        });

        self.fetch_location_name(at).await;
    }

    pub async fn fetch_location_name(&self, at: Coordinate) {
        self.set_location(LocationLabel::Loading);

        let label = match self.geocoder.reverse(at).await {
            Ok(address) => LocationLabel::from_address(address),
            Err(e) => {
                tracing::warn!("Reverse geocoding {} failed: {}", at, e);
                LocationLabel::Raw { coordinate: at }
            }
        };
        self.set_location(label);
    }

    fn set_location(&self, label: LocationLabel) {
        self.view
            .update(|view| view.weather.location = Some(label.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{FakeGeocoder, FakeWeather};
    use crate::domain::weather::PlaceAddress;

    fn service(weather: Arc<FakeWeather>, geocoder: Arc<FakeGeocoder>) -> (WeatherService, Arc<ViewStore>) {
        let view = Arc::new(ViewStore::default());
        (WeatherService::new(view.clone(), weather, geocoder), view)
    }

    #[tokio::test]
    async fn test_fetch_weather_projects_snapshot() {
        let weather = Arc::new(FakeWeather::succeeding());
        let geocoder = Arc::new(FakeGeocoder::with_address(PlaceAddress {
            city: Some("Jakarta".to_string()),
            town: None,
            country: Some("Indonesia".to_string()),
        }));
        let (service, view) = service(weather.clone(), geocoder.clone());

        service.fetch_weather(Coordinate::new(-6.2, 106.8)).await;

        let panel = view.snapshot().weather;
        assert_eq!(panel.temperature.as_deref(), Some("29.4"));
        assert_eq!(panel.windspeed.as_deref(), Some("7.2"));
        assert_eq!(panel.wind_direction.as_deref(), Some("210°"));
        assert_eq!(panel.condition.as_deref(), Some("Mendung"));
        assert_eq!(panel.elevation.as_deref(), Some("8 m"));
        assert_eq!(panel.time.as_deref(), Some("14:05"));
        assert_eq!(panel.location.as_deref(), Some("Jakarta, Indonesia"));
        assert_eq!(weather.calls(), vec![Coordinate::new(-6.2, 106.8)]);
        assert_eq!(geocoder.reverse_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_forecast_leaves_panel_untouched() {
        let weather = Arc::new(FakeWeather::failing());
        let geocoder = Arc::new(FakeGeocoder::default());
        let (service, view) = service(weather, geocoder.clone());
        view.update(|v| v.weather.temperature = Some("27".to_string()));

        service.fetch_weather(Coordinate::new(1.0, 2.0)).await;

        let panel = view.snapshot().weather;
        assert_eq!(panel.temperature.as_deref(), Some("27"));
        assert_eq!(panel.location, None);
        assert_eq!(geocoder.reverse_calls(), 0);
    }

    #[tokio::test]
    async fn test_location_shows_loading_while_in_flight() {
        let view = Arc::new(ViewStore::default());
        let geocoder = Arc::new(FakeGeocoder::default().observing(view.clone()));
        let service = WeatherService::new(
            view.clone(),
            Arc::new(FakeWeather::succeeding()),
            geocoder.clone(),
        );

        service.fetch_location_name(Coordinate::new(0.0, 0.0)).await;

        assert_eq!(geocoder.location_seen_in_flight().as_deref(), Some("Loading..."));
        assert_eq!(
            view.snapshot().weather.location.as_deref(),
            Some("Unknown Location")
        );
    }

    #[tokio::test]
    async fn test_location_failure_falls_back_to_coordinates() {
        let geocoder = Arc::new(FakeGeocoder::failing());
        let (service, view) = service(Arc::new(FakeWeather::succeeding()), geocoder);

        service.fetch_location_name(Coordinate::new(-6.2, 106.8)).await;

        assert_eq!(
            view.snapshot().weather.location.as_deref(),
            Some("-6.2000, 106.8000")
        );
    }
}
