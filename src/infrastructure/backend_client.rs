// HTTP adapter for the local sensor backend
use crate::application::ports::{FetchError, SensorBackend};
use crate::domain::sensor::{HistorySample, SensorSnapshot};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

const SERVICE: &str = "sensor backend";

#[derive(Debug, Clone)]
pub struct HttpSensorBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ToggleRequest {
    active: bool,
}

impl HttpSensorBackend {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // The backend's status codes are not part of its contract; only the body is read.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                service: SERVICE,
                source,
            })?;

        response.json::<T>().await.map_err(|e| FetchError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SensorBackend for HttpSensorBackend {
    async fn read_sensor(&self) -> Result<SensorSnapshot, FetchError> {
        self.get_json("/sensor-read").await
    }

    async fn read_history(&self) -> Result<Vec<HistorySample>, FetchError> {
        self.get_json("/history").await
    }

    async fn set_simulation(&self, active: bool) -> Result<(), FetchError> {
        self.client
            .post(self.url("/toggle-sim"))
            .json(&ToggleRequest { active })
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                service: SERVICE,
                source,
            })?;
        Ok(())
    }
}
