// Open-Meteo forecast adapter
use crate::application::ports::{FetchError, WeatherProvider};
use crate::domain::coordinate::Coordinate;
use crate::domain::weather::WeatherSnapshot;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;

const SERVICE: &str = "forecast";

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    forecast_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
    elevation: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: i32,
    time: String,
}

impl OpenMeteoClient {
    pub fn new(client: reqwest::Client, forecast_url: String) -> Self {
        Self {
            client,
            forecast_url,
        }
    }

    fn build_url(&self, at: Coordinate) -> String {
        format!(
            "{}?latitude={}&longitude={}&current_weather=true",
            self.forecast_url, at.latitude, at.longitude
        )
    }
}

fn to_snapshot(response: ForecastResponse) -> Result<WeatherSnapshot, FetchError> {
    let current = response.current_weather;
    let observed_at = parse_observation_time(&current.time).ok_or_else(|| FetchError::Decode {
        service: SERVICE,
        message: format!("unrecognized observation time {:?}", current.time),
    })?;

    Ok(WeatherSnapshot {
        temperature: current.temperature,
        windspeed: current.windspeed,
        winddirection: current.winddirection,
        weathercode: current.weathercode,
        elevation: response.elevation,
        observed_at,
    })
}

/// Open-Meteo reports local time without an offset, e.g. `2024-05-01T14:00`
fn parse_observation_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|t| t.naive_local())
        })
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn current_weather(&self, at: Coordinate) -> Result<WeatherSnapshot, FetchError> {
        let url = self.build_url(at);
        tracing::debug!("Open-Meteo request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                service: SERVICE,
                source,
            })?;

        check_status(response.status())?;

        let data = response
            .json::<ForecastResponse>()
            .await
            .map_err(|e| FetchError::Decode {
                service: SERVICE,
                message: e.to_string(),
            })?;

        to_snapshot(data)
    }
}

/// Open-Meteo answers errors with a JSON body, so the status has to be
/// checked before decoding.
fn check_status(status: reqwest::StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            service: SERVICE,
            status,
        })
    }
}
