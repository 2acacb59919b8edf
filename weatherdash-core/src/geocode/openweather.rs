//! OpenWeather reverse geocoding (`/geo/1.0/reverse`).

use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::Coordinates,
    provider::{http_client, read_json},
};

pub const OPENWEATHER_GEO_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// A named place near the requested coordinates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeoPlace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherGeocoder {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherGeocoder {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, OPENWEATHER_GEO_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self {
            api_key,
            base_url: base_url.into(),
            http: http_client(None)?,
        })
    }

    /// Up to `limit` places ranked by the provider.
    pub async fn reverse(&self, coords: Coordinates, limit: u8) -> Result<Vec<GeoPlace>, FetchError> {
        let url = format!("{}/reverse", self.base_url.trim_end_matches('/'));

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude().to_string()),
                ("lon", coords.longitude().to_string()),
                ("limit", limit.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        read_json(res).await
    }
}
