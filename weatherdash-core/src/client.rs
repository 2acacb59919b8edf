use anyhow::Context;
use std::sync::Arc;

use crate::{
    config::Config,
    error::FetchError,
    geocode::{GeocodingMode, LocalityResolver, NominatimClient, OpenWeatherGeocoder},
    model::{Coordinates, LocationQuery, WeatherSnapshot},
    provider::{WeatherProvider, openweather::OpenWeatherProvider},
};

/// Fetches current conditions and forecast for one location.
///
/// Both requests must succeed; there is no partial result and no retry.
#[derive(Debug)]
pub struct WeatherClient {
    provider: Arc<dyn WeatherProvider>,
    resolver: LocalityResolver,
}

impl WeatherClient {
    pub fn new(provider: Arc<dyn WeatherProvider>, resolver: LocalityResolver) -> Self {
        Self { provider, resolver }
    }

    /// Build the OpenWeather-backed client described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?.to_owned();
        let mode = config.geocoding_mode()?;

        let provider = OpenWeatherProvider::new(api_key.clone())
            .context("Failed to build OpenWeather client")?;
        let geocoder = Arc::new(
            OpenWeatherGeocoder::new(api_key).context("Failed to build geocoding client")?,
        );

        let resolver = match mode {
            GeocodingMode::Tiered => {
                let nominatim = NominatimClient::new(config.user_agent())
                    .context("Failed to build Nominatim client")?;
                LocalityResolver::tiered(geocoder, Arc::new(nominatim))
            }
            GeocodingMode::Simple => LocalityResolver::simple(geocoder),
        };

        Ok(Self::new(Arc::new(provider), resolver))
    }

    pub async fn fetch(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError> {
        match query {
            LocationQuery::ByCity(name) => self.fetch_by_city(name).await,
            LocationQuery::ByCoordinates(coords) => self.fetch_by_coordinates(*coords).await,
        }
    }

    pub async fn fetch_by_city(&self, name: &str) -> Result<WeatherSnapshot, FetchError> {
        let query = LocationQuery::city(name)?;
        self.fetch_pair(&query).await
    }

    /// Like [`fetch_by_city`](Self::fetch_by_city), with the place name
    /// replaced by the reverse-geocoded locality.
    ///
    /// A weather failure returns immediately and cancels the lookup.
    pub async fn fetch_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSnapshot, FetchError> {
        let query = LocationQuery::ByCoordinates(coords);
        let locality = async { Ok::<_, FetchError>(self.resolver.resolve(coords).await) };
        let (mut snapshot, place_name) = tokio::try_join!(self.fetch_pair(&query), locality)?;

        snapshot.current.place_name = place_name;
        Ok(snapshot)
    }

    async fn fetch_pair(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError> {
        let (current, forecast) = tokio::try_join!(
            self.provider.current(query),
            self.provider.forecast(query)
        )?;

        tracing::debug!(
            "Fetched {} forecast samples for {}",
            forecast.len(),
            current.place_name
        );
        Ok(WeatherSnapshot { current, forecast })
    }
}
