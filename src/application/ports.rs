// Ports for the network services the dashboard talks to
use crate::domain::coordinate::Coordinate;
use crate::domain::sensor::{HistorySample, SensorSnapshot};
use crate::domain::suggestion::Suggestion;
use crate::domain::weather::{PlaceAddress, WeatherSnapshot};
use async_trait::async_trait;
use thiserror::Error;

/// Failure of one request to an external service
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} answered with status {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("{service} response could not be decoded: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

/// The local sensor backend (`/sensor-read`, `/history`, `/toggle-sim`)
#[async_trait]
pub trait SensorBackend: Send + Sync {
    /// Current reading; fields the backend did not report are `None`
    async fn read_sensor(&self) -> Result<SensorSnapshot, FetchError>;

    /// Full history, oldest first
    async fn read_history(&self) -> Result<Vec<HistorySample>, FetchError>;

    /// Ask the backend to start or stop its simulator
    async fn set_simulation(&self, active: bool) -> Result<(), FetchError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, at: Coordinate) -> Result<WeatherSnapshot, FetchError>;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Address around `at`; `None` when the service knows no address there
    async fn reverse(&self, at: Coordinate) -> Result<Option<PlaceAddress>, FetchError>;

    /// Free-text place search, at most `limit` results
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>, FetchError>;
}
