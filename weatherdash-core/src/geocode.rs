//! Turn coordinates into a human-readable place name.
//!
//! [`LocalityResolver`] walks an ordered list of [`LocalityStrategy`]
//! tiers and returns the first name any of them produces. Provider
//! failures inside a tier are logged and treated as "no result", so
//! resolution itself never fails.

use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::model::Coordinates;

pub mod nominatim;
pub mod openweather;

pub use nominatim::{Address, NominatimClient};
pub use openweather::{GeoPlace, OpenWeatherGeocoder};

pub const UNKNOWN_LOCATION: &str = "Unknown location";

const DETAILED_LIMIT: u8 = 5;
const TOP_LIMIT: u8 = 1;

/// Which tiers the resolver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeocodingMode {
    /// OpenWeather (5 candidates), then Nominatim, then OpenWeather (top candidate).
    #[default]
    Tiered,
    /// OpenWeather top candidate only.
    Simple,
}

impl GeocodingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeocodingMode::Tiered => "tiered",
            GeocodingMode::Simple => "simple",
        }
    }

    pub const fn all() -> &'static [GeocodingMode] {
        &[GeocodingMode::Tiered, GeocodingMode::Simple]
    }
}

impl std::fmt::Display for GeocodingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for GeocodingMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "tiered" => Ok(GeocodingMode::Tiered),
            "simple" => Ok(GeocodingMode::Simple),
            _ => Err(anyhow::anyhow!(
                "Unknown geocoding mode '{value}'. Supported modes: tiered, simple."
            )),
        }
    }
}

/// One tier of the fallback chain.
#[async_trait]
pub trait LocalityStrategy: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    /// A display name for `coords`, or `None` to defer to the next tier.
    async fn resolve(&self, coords: Coordinates) -> Option<String>;
}

#[derive(Debug)]
pub struct LocalityResolver {
    strategies: Vec<Box<dyn LocalityStrategy>>,
}

impl LocalityResolver {
    pub fn new(strategies: Vec<Box<dyn LocalityStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn tiered(geocoder: Arc<OpenWeatherGeocoder>, nominatim: Arc<NominatimClient>) -> Self {
        Self::new(vec![
            Box::new(DetailedPlaces(geocoder.clone())),
            Box::new(OsmAddress(nominatim)),
            Box::new(TopPlace(geocoder)),
        ])
    }

    pub fn simple(geocoder: Arc<OpenWeatherGeocoder>) -> Self {
        Self::new(vec![Box::new(TopPlace(geocoder))])
    }

    /// Best available name for `coords`, falling back to [`UNKNOWN_LOCATION`].
    pub async fn resolve(&self, coords: Coordinates) -> String {
        for strategy in &self.strategies {
            if let Some(name) = strategy.resolve(coords).await {
                tracing::info!("Resolved locality via {}: {}", strategy.name(), name);
                return name;
            }
            tracing::debug!("Locality tier {} produced nothing", strategy.name());
        }
        UNKNOWN_LOCATION.to_string()
    }
}

/// Tier 1: several OpenWeather candidates, preferring a specific locality.
#[derive(Debug)]
pub struct DetailedPlaces(pub Arc<OpenWeatherGeocoder>);

#[async_trait]
impl LocalityStrategy for DetailedPlaces {
    fn name(&self) -> &'static str {
        "openweather-detailed"
    }

    async fn resolve(&self, coords: Coordinates) -> Option<String> {
        match self.0.reverse(coords, DETAILED_LIMIT).await {
            Ok(places) => describe_places(&places),
            Err(err) => {
                tracing::warn!("OpenWeather reverse geocode failed: {err}");
                None
            }
        }
    }
}

/// Tier 2: Nominatim address details.
#[derive(Debug)]
pub struct OsmAddress(pub Arc<NominatimClient>);

#[async_trait]
impl LocalityStrategy for OsmAddress {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn resolve(&self, coords: Coordinates) -> Option<String> {
        match self.0.reverse(coords).await {
            Ok(address) => address.as_ref().and_then(describe_address),
            Err(err) => {
                tracing::warn!("Nominatim reverse geocode failed: {err}");
                None
            }
        }
    }
}

/// Tier 3: the single top OpenWeather candidate.
#[derive(Debug)]
pub struct TopPlace(pub Arc<OpenWeatherGeocoder>);

#[async_trait]
impl LocalityStrategy for TopPlace {
    fn name(&self) -> &'static str {
        "openweather-top"
    }

    async fn resolve(&self, coords: Coordinates) -> Option<String> {
        match self.0.reverse(coords, TOP_LIMIT).await {
            Ok(places) => top_place_name(&places),
            Err(err) => {
                tracing::warn!("Final OpenWeather reverse geocode failed: {err}");
                None
            }
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn same_text(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// A place is specific when its name differs from both its state and country.
fn is_specific(place: &GeoPlace) -> bool {
    let Some(name) = present(&place.name) else {
        return false;
    };
    let differs = |other: Option<&str>| !same_text(name, other.unwrap_or_default());
    differs(present(&place.state)) && differs(present(&place.country))
}

/// `"name, state, country"` for the most specific candidate, skipping
/// components that repeat their predecessor.
pub fn describe_places(places: &[GeoPlace]) -> Option<String> {
    let chosen = places
        .iter()
        .find(|p| is_specific(p))
        .or_else(|| places.first())?;

    let name = present(&chosen.name);
    let state = present(&chosen.state);
    let country = present(&chosen.country);

    let mut parts = Vec::new();
    if let Some(name) = name {
        parts.push(name);
    }
    if let Some(state) = state.filter(|s| name.is_none_or(|n| !same_text(s, n))) {
        parts.push(state);
    }
    if let Some(country) = country.filter(|c| state.is_none_or(|s| !same_text(c, s))) {
        parts.push(country);
    }

    (!parts.is_empty()).then(|| parts.join(", "))
}

/// `"{locality}, {city}"` from Nominatim address components, or whichever
/// of the two exists.
pub fn describe_address(address: &Address) -> Option<String> {
    let locality = [
        &address.suburb,
        &address.neighbourhood,
        &address.hamlet,
        &address.village,
        &address.town,
        &address.city_district,
        &address.city,
        &address.county,
        &address.state,
    ]
    .into_iter()
    .find_map(present);

    let city = [&address.city, &address.town, &address.county, &address.state]
        .into_iter()
        .find_map(present);

    match (locality, city) {
        (Some(local), Some(city)) if !same_text(local, city) => Some(format!("{local}, {city}")),
        (Some(local), _) => Some(local.to_string()),
        (None, Some(city)) => Some(city.to_string()),
        (None, None) => None,
    }
}

/// Name, state or country of the first candidate.
pub fn top_place_name(places: &[GeoPlace]) -> Option<String> {
    let first = places.first()?;
    present(&first.name)
        .or_else(|| present(&first.state))
        .or_else(|| present(&first.country))
        .map(str::to_string)
}
