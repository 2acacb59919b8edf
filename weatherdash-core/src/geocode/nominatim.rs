//! OpenStreetMap Nominatim reverse geocoding.

use reqwest::{Client, header::ACCEPT_LANGUAGE};
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::Coordinates,
    provider::{http_client, read_json},
};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = concat!("weatherdash/", env!("CARGO_PKG_VERSION"));

/// Address components returned with `addressdetails=1`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Address {
    pub suburb: Option<String>,
    pub neighbourhood: Option<String>,
    pub hamlet: Option<String>,
    pub village: Option<String>,
    pub town: Option<String>,
    pub city_district: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<Address>,
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    base_url: String,
    http: Client,
}

impl NominatimClient {
    /// Nominatim's usage policy requires an identifying `User-Agent`.
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        Self::with_base_url(user_agent, NOMINATIM_URL)
    }

    pub fn with_base_url(user_agent: &str, base_url: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self {
            base_url: base_url.into(),
            http: http_client(Some(user_agent))?,
        })
    }

    /// The structured address at `coords`, if Nominatim knows one.
    pub async fn reverse(&self, coords: Coordinates) -> Result<Option<Address>, FetchError> {
        let url = format!("{}/reverse", self.base_url.trim_end_matches('/'));

        let res = self
            .http
            .get(&url)
            .header(ACCEPT_LANGUAGE, "en")
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", coords.latitude().to_string()),
                ("lon", coords.longitude().to_string()),
                ("zoom", "18".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await?;

        let body: NominatimResponse = read_json(res).await?;
        Ok(body.address)
    }
}
