use crate::application::autocomplete::SearchSettings;
use crate::application::map_controller::MapSettings;
use crate::application::session::SessionSettings;
use crate::domain::coordinate::Coordinate;
use crate::domain::map::TileLayer;
use anyhow::{bail, Context};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub services: ServiceSettings,
    pub map: MapConfig,
    pub polling: PollingSettings,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceSettings {
    pub forecast_url: String,
    pub geocoder_url: String,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapConfig {
    pub default_latitude: f64,
    pub default_longitude: f64,
    pub zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub settle_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PollingSettings {
    pub sensor_interval_ms: u64,
    pub history_interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub min_query_len: usize,
    pub limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("garden-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_latitude: -6.1754,
            default_longitude: 106.8272,
            zoom: 13,
            max_zoom: 19,
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap".to_string(),
            settle_delay_ms: 400,
        }
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            sensor_interval_ms: 2_000,
            history_interval_ms: 2_000,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 3,
            limit: 5,
        }
    }
}

/// Load `config/dashboard.toml` (optional) with `DASHBOARD__SECTION__KEY`
/// environment overrides on top of the built-in defaults.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.bind_addr()?;
        for (key, url) in [
            ("backend.base_url", &self.backend.base_url),
            ("services.forecast_url", &self.services.forecast_url),
            ("services.geocoder_url", &self.services.geocoder_url),
        ] {
            reqwest::Url::parse(url).with_context(|| format!("{} is not a valid URL: {:?}", key, url))?;
        }
        if self.polling.sensor_interval_ms == 0 {
            bail!("polling.sensor_interval_ms must be greater than zero");
        }
        if self.polling.history_interval_ms == 0 {
            bail!("polling.history_interval_ms must be greater than zero");
        }
        if self.search.limit == 0 {
            bail!("search.limit must be greater than zero");
        }
        let center = self.map.center();
        if !(-90.0..=90.0).contains(&center.latitude) || !(-180.0..=180.0).contains(&center.longitude) {
            bail!("map.default_latitude/default_longitude out of range: {}", center);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("server.bind is not a socket address: {:?}", self.server.bind))
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            map: MapSettings {
                center: self.map.center(),
                zoom: self.map.zoom,
                tile_layer: TileLayer {
                    url_template: self.map.tile_url.clone(),
                    max_zoom: self.map.max_zoom,
                    attribution: self.map.attribution.clone(),
                },
                settle_delay: Duration::from_millis(self.map.settle_delay_ms),
            },
            search: SearchSettings {
                debounce: Duration::from_millis(self.search.debounce_ms),
                min_query_len: self.search.min_query_len,
                limit: self.search.limit,
            },
            sensor_interval: Duration::from_millis(self.polling.sensor_interval_ms),
            history_interval: Duration::from_millis(self.polling.history_interval_ms),
        }
    }
}

impl MapConfig {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.default_latitude, self.default_longitude)
    }
}
