// Coordinate domain model
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Decimal places shown in the coordinate inputs
pub const DISPLAY_PRECISION: usize = 4;

/// What the page tells the user whenever the inputs cannot be used
pub const INPUT_PROMPT: &str = "Please enter both latitude and longitude.";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Please enter both latitude and longitude.")]
    Missing,
    #[error("{field} is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },
}

impl CoordinateError {
    /// Missing and malformed input read the same to the user
    pub fn prompt(&self) -> &'static str {
        INPUT_PROMPT
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Parse the raw text of the latitude/longitude inputs.
    /// Both must be present and numeric before anything is fetched.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, CoordinateError> {
        let latitude = latitude.trim();
        let longitude = longitude.trim();
        if latitude.is_empty() || longitude.is_empty() {
            return Err(CoordinateError::Missing);
        }

        Ok(Self {
            latitude: parse_component("latitude", latitude)?,
            longitude: parse_component("longitude", longitude)?,
        })
    }

    /// Round both components to the display precision
    pub fn rounded(&self) -> Self {
        let factor = 10f64.powi(DISPLAY_PRECISION as i32);
        Self {
            latitude: (self.latitude * factor).round() / factor,
            longitude: (self.longitude * factor).round() / factor,
        }
    }

    pub fn display_latitude(&self) -> String {
        format!("{:.*}", DISPLAY_PRECISION, self.latitude)
    }

    pub fn display_longitude(&self) -> String {
        format!("{:.*}", DISPLAY_PRECISION, self.longitude)
    }
}

fn parse_component(field: &'static str, value: &str) -> Result<f64, CoordinateError> {
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(CoordinateError::NotNumeric {
            field,
            value: value.to_string(),
        }),
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.display_latitude(), self.display_longitude())
    }
}
