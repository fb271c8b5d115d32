// Sensor history chart model
use super::sensor::HistorySample;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
}

/// Vertical gradient from `top_alpha` to `bottom_alpha` of the series color
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientFill {
    pub rgb: [u8; 3],
    pub top_alpha: f32,
    pub bottom_alpha: f32,
}

impl GradientFill {
    fn fading(rgb: [u8; 3]) -> Self {
        Self {
            rgb,
            top_alpha: 0.4,
            bottom_alpha: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    pub border_width: u8,
    pub point_radius: u8,
    pub point_hover_radius: u8,
    pub tension: f32,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            border_width: 2,
            point_radius: 0,
            point_hover_radius: 4,
            tension: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: String,
    pub fill: GradientFill,
    pub style: SeriesStyle,
    /// `None` is drawn as a gap in the line
    pub values: Vec<Option<f64>>,
}

impl SeriesData {
    fn new(id: &str, name: &str, color: &str, rgb: [u8; 3]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            fill: GradientFill::fading(rgb),
            style: SeriesStyle::default(),
            values: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub begin_at_zero: bool,
    pub max: Option<f64>,
    pub max_ticks: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub id: String,
    pub kind: ChartKind,
    pub animated: bool,
    pub labels: Vec<String>,
    pub series: Vec<SeriesData>,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
}

pub const TEMPERATURE_SERIES: usize = 0;
pub const HUMIDITY_SERIES: usize = 1;
pub const SOIL_SERIES: usize = 2;

impl ChartData {
    /// Empty activity chart with the temperature, humidity and soil lines
    pub fn sensor_history() -> Self {
        Self {
            id: "activityChart".to_string(),
            kind: ChartKind::Line,
            animated: false,
            labels: Vec::new(),
            series: vec![
                SeriesData::new("temperature", "Temp (°C)", "#0e46a3", [14, 70, 163]),
                SeriesData::new("humidity", "Humidity (%)", "#22c55e", [34, 197, 94]),
                SeriesData::new("soil", "Soil Moisture (%)", "#8b4513", [139, 69, 19]),
            ],
            x_axis: AxisOptions {
                begin_at_zero: false,
                max: None,
                max_ticks: Some(6),
            },
            y_axis: AxisOptions {
                begin_at_zero: true,
                max: Some(100.0),
                max_ticks: None,
            },
        }
    }

    /// Swap the label axis and all three series for `history`.
    /// Nothing from the previous dataset survives.
    pub fn replace_history(&mut self, history: &[HistorySample]) {
        self.labels = history.iter().map(|s| s.time.clone()).collect();
        self.series[TEMPERATURE_SERIES].values = history.iter().map(|s| s.temperature).collect();
        self.series[HUMIDITY_SERIES].values = history.iter().map(|s| s.humidity).collect();
        self.series[SOIL_SERIES].values = history.iter().map(|s| s.soil).collect();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}
