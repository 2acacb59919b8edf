use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, QueryError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(QueryError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(QueryError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// What the user asked weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    ByCity(String),
    ByCoordinates(Coordinates),
}

impl LocationQuery {
    /// Build a city query, trimming surrounding whitespace.
    pub fn city(name: &str) -> Result<Self, QueryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QueryError::EmptyCity);
        }
        Ok(Self::ByCity(name.to_string()))
    }

    /// Query parameters selecting this location on the OpenWeather endpoints.
    pub(crate) fn selector(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::ByCity(name) => vec![("q", name.clone())],
            Self::ByCoordinates(coords) => vec![
                ("lat", coords.latitude().to_string()),
                ("lon", coords.longitude().to_string()),
            ],
        }
    }
}

impl From<Coordinates> for LocationQuery {
    fn from(coords: Coordinates) -> Self {
        Self::ByCoordinates(coords)
    }
}

/// Current conditions, normalized from the provider payload. Temperatures
/// are Celsius and wind speed is m/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub place_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Primary category, e.g. "Rain" or "Clear". Empty when the provider sent none.
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub country: String,
}

/// One 3-hour forecast sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub icon: String,
    pub condition: String,
}

/// Summary of one calendar day of forecast samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub high_c: f64,
    pub low_c: f64,
    pub icon: String,
}

impl DailyForecast {
    /// Short weekday label, e.g. "Mon".
    pub fn weekday(&self) -> String {
        self.date.format("%a").to_string()
    }
}

/// The last successfully fetched data pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_reject_out_of_range_values() {
        assert_eq!(
            Coordinates::new(91.0, 0.0).unwrap_err(),
            QueryError::Latitude(91.0)
        );
        assert_eq!(
            Coordinates::new(0.0, -180.5).unwrap_err(),
            QueryError::Longitude(-180.5)
        );
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn city_query_is_trimmed_and_non_empty() {
        assert_eq!(
            LocationQuery::city("  Paris ").expect("valid city"),
            LocationQuery::ByCity("Paris".to_string())
        );
        assert_eq!(LocationQuery::city("   ").unwrap_err(), QueryError::EmptyCity);
    }

    #[test]
    fn selector_uses_lat_lon_for_coordinates() {
        let coords = Coordinates::new(48.8566, 2.3522).expect("valid coords");
        let selector = LocationQuery::from(coords).selector();
        assert_eq!(
            selector,
            vec![("lat", "48.8566".to_string()), ("lon", "2.3522".to_string())]
        );
    }

    #[test]
    fn weekday_label_is_short() {
        let day = DailyForecast {
            date: NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"),
            high_c: 20.0,
            low_c: 10.0,
            icon: "01d".to_string(),
        };
        assert_eq!(day.weekday(), "Mon");
    }
}
