// Local sensor domain models
use serde::{Deserialize, Deserializer};

/// Device name the backend reports while its simulator is driving the readings
pub const SIMULATOR_DEVICE: &str = "SIMULATOR";

/// Current reading from `/sensor-read`. Every field is optional; a field
/// that is absent, null or not a number is treated as "not reported".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SensorSnapshot {
    #[serde(default, rename = "temperature_c", deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
    #[serde(default, rename = "soil_percent", deserialize_with = "lenient_number")]
    pub soil: Option<f64>,
    #[serde(default)]
    pub device: Option<String>,
}

impl SensorSnapshot {
    pub fn is_simulator(&self) -> bool {
        self.device.as_deref() == Some(SIMULATOR_DEVICE)
    }
}

/// One entry of `/history`. The backend stores whatever the device posted,
/// so a reading may be null; such a value becomes a gap in its series.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistorySample {
    #[serde(default)]
    pub time: String,
    #[serde(default, rename = "temp", deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(default, rename = "hum", deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub soil: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Render a reading the way the page shows it: integers without a fraction
pub fn format_reading(value: f64) -> String {
    value.to_string()
}
