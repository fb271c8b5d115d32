// In-memory fakes for the service ports
use crate::application::ports::{FetchError, Geocoder, SensorBackend, WeatherProvider};
use crate::application::view::ViewStore;
use crate::domain::coordinate::Coordinate;
use crate::domain::sensor::{HistorySample, SensorSnapshot};
use crate::domain::suggestion::Suggestion;
use crate::domain::weather::{PlaceAddress, WeatherSnapshot};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn unavailable(service: &'static str) -> FetchError {
    FetchError::Status {
        service,
        status: StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub fn sample_weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: 29.4,
        windspeed: 7.2,
        winddirection: 210.0,
        weathercode: 3,
        elevation: 8.0,
        observed_at: NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap(),
    }
}

#[derive(Default)]
pub struct FakeWeather {
    fail: bool,
    calls: Mutex<Vec<Coordinate>>,
}

impl FakeWeather {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Coordinate> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn current_weather(&self, at: Coordinate) -> Result<WeatherSnapshot, FetchError> {
        self.calls.lock().unwrap().push(at);
        if self.fail {
            return Err(unavailable("forecast"));
        }
        Ok(sample_weather())
    }
}

#[derive(Default)]
pub struct FakeGeocoder {
    address: Option<PlaceAddress>,
    fail: bool,
    results: HashMap<String, Vec<Suggestion>>,
    delays: HashMap<String, Duration>,
    observed_view: Option<Arc<ViewStore>>,
    location_in_flight: Mutex<Option<String>>,
    reverse_calls: AtomicUsize,
    searches: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn with_address(address: PlaceAddress) -> Self {
        Self {
            address: Some(address),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Record the location label of `view` at the moment `reverse` runs
    pub fn observing(mut self, view: Arc<ViewStore>) -> Self {
        self.observed_view = Some(view);
        self
    }

    pub fn with_results(mut self, query: &str, results: Vec<Suggestion>) -> Self {
        self.results.insert(query.to_string(), results);
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn location_seen_in_flight(&self) -> Option<String> {
        self.location_in_flight.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn reverse(&self, _at: Coordinate) -> Result<Option<PlaceAddress>, FetchError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(view) = &self.observed_view {
            let seen = view.read(|v| v.weather.location.clone());
            *self.location_in_flight.lock().unwrap() = seen;
        }
        if self.fail {
            return Err(unavailable("geocoder"));
        }
        Ok(self.address.clone())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>, FetchError> {
        self.searches.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail {
            return Err(unavailable("geocoder"));
        }
        let mut results = self.results.get(query).cloned().unwrap_or_default();
        results.truncate(limit);
        Ok(results)
    }
}

/// Backend whose answers are queued up front. An exhausted queue behaves
/// like an unreachable backend.
#[derive(Default)]
pub struct FakeBackend {
    readings: Mutex<VecDeque<SensorSnapshot>>,
    histories: Mutex<VecDeque<Vec<HistorySample>>>,
    reject_toggle: bool,
    toggles: Mutex<Vec<bool>>,
    sensor_reads: AtomicUsize,
    history_reads: AtomicUsize,
}

impl FakeBackend {
    pub fn with_readings(readings: Vec<SensorSnapshot>) -> Self {
        Self {
            readings: Mutex::new(readings.into()),
            ..Self::default()
        }
    }

    pub fn with_histories(histories: Vec<Vec<HistorySample>>) -> Self {
        Self {
            histories: Mutex::new(histories.into()),
            ..Self::default()
        }
    }

    pub fn rejecting_toggle() -> Self {
        Self {
            reject_toggle: true,
            ..Self::default()
        }
    }

    pub fn push_reading(&self, reading: SensorSnapshot) {
        self.readings.lock().unwrap().push_back(reading);
    }

    pub fn push_history(&self, history: Vec<HistorySample>) {
        self.histories.lock().unwrap().push_back(history);
    }

    pub fn toggles(&self) -> Vec<bool> {
        self.toggles.lock().unwrap().clone()
    }

    pub fn sensor_reads(&self) -> usize {
        self.sensor_reads.load(Ordering::SeqCst)
    }

    pub fn history_reads(&self) -> usize {
        self.history_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SensorBackend for FakeBackend {
    async fn read_sensor(&self) -> Result<SensorSnapshot, FetchError> {
        self.sensor_reads.fetch_add(1, Ordering::SeqCst);
        self.readings
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| unavailable("sensor backend"))
    }

    async fn read_history(&self) -> Result<Vec<HistorySample>, FetchError> {
        self.history_reads.fetch_add(1, Ordering::SeqCst);
        self.histories
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| unavailable("sensor backend"))
    }

    async fn set_simulation(&self, active: bool) -> Result<(), FetchError> {
        self.toggles.lock().unwrap().push(active);
        if self.reject_toggle {
            return Err(unavailable("sensor backend"));
        }
        Ok(())
    }
}

pub fn reading(
    temperature: Option<f64>,
    humidity: Option<f64>,
    soil: Option<f64>,
    device: Option<&str>,
) -> SensorSnapshot {
    SensorSnapshot {
        temperature,
        humidity,
        soil,
        device: device.map(str::to_string),
    }
}

pub fn history(n: usize) -> Vec<HistorySample> {
    (0..n)
        .map(|i| HistorySample {
            time: format!("12:00:{:02}", (i * 2) % 60),
            temperature: Some(27.0 + i as f64 / 10.0),
            humidity: Some(60.0),
            soil: Some(45.0),
        })
        .collect()
}
