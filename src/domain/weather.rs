// Weather and location domain models
use super::coordinate::Coordinate;
use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: i32,
    pub elevation: f64,
    pub observed_at: NaiveDateTime,
}

impl WeatherSnapshot {
    pub fn description(&self) -> &'static str {
        describe_weather_code(self.weathercode)
    }

    /// Observation time as hour:minute
    pub fn observed_clock(&self) -> String {
        self.observed_at.format("%H:%M").to_string()
    }
}

/// Human label for a WMO weather code
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Cerah",
        1 => "Cerah Berawan",
        2 => "Berawan",
        3 => "Mendung",
        61 => "Hujan",
        80 => "Hujan Lokal",
        95 => "Badai Petir",
        _ => "Unknown",
    }
}

/// Address parts returned by reverse geocoding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationLabel {
    Loading,
    Named { city: String, country: String },
    UnknownLocation,
    Raw { coordinate: Coordinate },
}

impl LocationLabel {
    pub fn from_address(address: Option<PlaceAddress>) -> Self {
        match address {
            Some(address) => {
                let city = address
                    .city
                    .or(address.town)
                    .unwrap_or_else(|| "Unknown".to_string());
                Self::Named {
                    city,
                    country: address.country.unwrap_or_default(),
                }
            }
            None => Self::UnknownLocation,
        }
    }
}

impl fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("Loading..."),
            Self::Named { city, country } => write!(f, "{}, {}", city, country),
            Self::UnknownLocation => f.write_str("Unknown Location"),
            Self::Raw { coordinate } => write!(f, "{}", coordinate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_weather_code_table() {
        assert_eq!(describe_weather_code(0), "Cerah");
        assert_eq!(describe_weather_code(61), "Hujan");
        assert_eq!(describe_weather_code(95), "Badai Petir");
        assert_eq!(describe_weather_code(45), "Unknown");
        assert_eq!(describe_weather_code(-1), "Unknown");
    }

    #[test]
    fn test_observed_clock() {
        let snapshot = WeatherSnapshot {
            temperature: 29.4,
            windspeed: 7.2,
            winddirection: 210.0,
            weathercode: 3,
            elevation: 8.0,
            observed_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(14, 5, 0)
                .unwrap(),
        };
        assert_eq!(snapshot.observed_clock(), "14:05");
        assert_eq!(snapshot.description(), "Mendung");
    }

    #[test]
    fn test_location_label_falls_back_to_town() {
        let label = LocationLabel::from_address(Some(PlaceAddress {
            city: None,
            town: Some("Bogor".to_string()),
            country: Some("Indonesia".to_string()),
        }));
        assert_eq!(label.to_string(), "Bogor, Indonesia");

        let label = LocationLabel::from_address(Some(PlaceAddress::default()));
        assert_eq!(label.to_string(), "Unknown, ");

        assert_eq!(LocationLabel::from_address(None).to_string(), "Unknown Location");
    }

    #[test]
    fn test_raw_label_shows_coordinate() {
        let label = LocationLabel::Raw {
            coordinate: Coordinate::new(-6.2, 106.8),
        };
        assert_eq!(label.to_string(), "-6.2000, 106.8000");
    }
}
