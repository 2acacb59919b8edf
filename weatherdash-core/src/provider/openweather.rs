use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{CurrentConditions, ForecastEntry, LocationQuery},
    provider::{http_client, read_json},
};

use super::WeatherProvider;

pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, OPENWEATHER_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self {
            api_key,
            base_url: base_url.into(),
            http: http_client(None)?,
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url.trim_end_matches('/'));
        tracing::debug!("GET {url} for {query:?}");

        let res = self
            .http
            .get(&url)
            .query(&query.selector())
            .query(&[("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        read_json(res).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwWeather {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_max: f64,
    temp_min: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

impl OwCurrentResponse {
    fn into_conditions(self) -> Result<CurrentConditions, FetchError> {
        let weather = self.weather.into_iter().next().unwrap_or_default();
        let country = self.sys.country.unwrap_or_default();

        let place_name = if country.is_empty() {
            self.name
        } else {
            format!("{}, {}", self.name, country)
        };

        Ok(CurrentConditions {
            place_name,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed.max(0.0),
            condition: weather.main,
            description: weather.description,
            icon: weather.icon,
            sunrise: unix_to_utc(self.sys.sunrise)?,
            sunset: unix_to_utc(self.sys.sunset)?,
            country,
        })
    }
}

impl OwForecastEntry {
    fn into_entry(self) -> Result<ForecastEntry, FetchError> {
        let weather = self.weather.into_iter().next().unwrap_or_default();
        Ok(ForecastEntry {
            timestamp: unix_to_utc(self.dt)?,
            temp_max_c: self.main.temp_max,
            temp_min_c: self.main.temp_min,
            icon: weather.icon,
            condition: weather.main,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, FetchError> {
        let parsed: OwCurrentResponse = self.get("weather", query).await?;
        parsed.into_conditions()
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self.get("forecast", query).await?;
        parsed
            .list
            .into_iter()
            .map(OwForecastEntry::into_entry)
            .collect()
    }
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, FetchError> {
    DateTime::from_timestamp(ts, 0).ok_or_else(|| FetchError::Malformed {
        status: 200,
        detail: format!("timestamp {ts} out of range"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"{
        "name": "Paris",
        "main": {"temp": 21.4, "feels_like": 20.9, "humidity": 64},
        "weather": [{"main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "wind": {"speed": 4.1},
        "sys": {"country": "FR", "sunrise": 1760853600, "sunset": 1760892000}
    }"#;

    #[test]
    fn current_payload_normalizes_to_conditions() {
        let parsed: OwCurrentResponse = serde_json::from_str(CURRENT).expect("valid payload");
        let current = parsed.into_conditions().expect("conditions");

        assert_eq!(current.place_name, "Paris, FR");
        assert_eq!(current.condition, "Clouds");
        assert_eq!(current.description, "scattered clouds");
        assert_eq!(current.icon, "03d");
        assert_eq!(current.humidity_pct, 64);
        assert_eq!(current.sunrise.timestamp(), 1_760_853_600);
    }

    #[test]
    fn missing_weather_descriptor_yields_empty_strings() {
        let payload = r#"{
            "name": "Nowhere",
            "main": {"temp": 1.0, "feels_like": 0.0, "humidity": 10},
            "weather": [],
            "wind": {"speed": 0.0},
            "sys": {"sunrise": 0, "sunset": 0}
        }"#;
        let parsed: OwCurrentResponse = serde_json::from_str(payload).expect("valid payload");
        let current = parsed.into_conditions().expect("conditions");

        assert_eq!(current.place_name, "Nowhere");
        assert!(current.condition.is_empty());
        assert!(current.icon.is_empty());
    }

    #[test]
    fn forecast_entries_keep_order() {
        let payload = r#"{"list": [
            {"dt": 1760896800, "main": {"temp_max": 15.0, "temp_min": 12.0}, "weather": [{"main": "Rain", "icon": "10n"}]},
            {"dt": 1760907600, "main": {"temp_max": 13.5, "temp_min": 11.0}, "weather": [{"main": "Clouds", "icon": "04n"}]}
        ]}"#;
        let parsed: OwForecastResponse = serde_json::from_str(payload).expect("valid payload");
        let entries: Vec<ForecastEntry> = parsed
            .list
            .into_iter()
            .map(OwForecastEntry::into_entry)
            .collect::<Result<_, _>>()
            .expect("entries");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].condition, "Rain");
        assert_eq!(entries[1].icon, "04n");
        assert!(entries[0].timestamp < entries[1].timestamp);
    }
}
