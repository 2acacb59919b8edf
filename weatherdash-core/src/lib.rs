//! Core library for the `weatherdash` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - OpenWeather clients for current conditions, forecasts and reverse geocoding
//! - The tiered locality resolver
//! - Forecast aggregation, advisories and unit formatting
//! - The view-model and application state handed to a renderer
//!
//! It is used by `weatherdash-cli`, but can also be reused by other front ends.

pub mod advisory;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod model;
pub mod provider;
pub mod units;
pub mod view;

pub use app::{
    AppState, Dashboard, FixedLocator, Geolocator, LocateOutcome, PendingFetch, RequestTicket,
};
pub use client::WeatherClient;
pub use config::Config;
pub use error::{FetchError, GeolocationError, QueryError};
pub use geocode::{GeocodingMode, LocalityResolver, LocalityStrategy};
pub use model::{
    Coordinates, CurrentConditions, DailyForecast, ForecastEntry, LocationQuery, WeatherSnapshot,
};
pub use provider::WeatherProvider;
pub use units::UnitPreference;
pub use view::ViewModel;
