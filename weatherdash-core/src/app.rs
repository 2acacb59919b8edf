//! Application state and the controller driving user actions.

use async_trait::async_trait;
use chrono::TimeZone;
use std::{fmt::Debug, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    client::WeatherClient,
    config::{Config, DEFAULT_CITY},
    error::{FetchError, GeolocationError},
    model::{Coordinates, LocationQuery, WeatherSnapshot},
    units::UnitPreference,
    view::ViewModel,
};

pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(20);

/// Identifies one issued request. Only the most recent ticket may update state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Cached data, unit preference and request bookkeeping.
#[derive(Debug, Default)]
pub struct AppState {
    units: UnitPreference,
    snapshot: Option<WeatherSnapshot>,
    view: Option<ViewModel>,
    issued: u64,
}

impl AppState {
    pub fn new(units: UnitPreference) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    pub fn units(&self) -> UnitPreference {
        self.units
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn view_model(&self) -> Option<&ViewModel> {
        self.view.as_ref()
    }

    /// Flip the unit preference. Cached data is untouched.
    pub fn toggle_units(&mut self) -> UnitPreference {
        self.units = self.units.toggled();
        self.units
    }

    pub fn begin_request(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Store a fetch result. Returns `false` and discards it when a newer
    /// request has been issued since `ticket`.
    pub fn apply(
        &mut self,
        ticket: RequestTicket,
        snapshot: WeatherSnapshot,
        view: ViewModel,
    ) -> bool {
        if !self.is_latest(ticket) {
            tracing::debug!("Discarding stale result for request {}", ticket.0);
            return false;
        }
        self.snapshot = Some(snapshot);
        self.view = Some(view);
        true
    }
}

/// Platform source of the user's position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Geolocator answering with preset coordinates, or `Unavailable` without them.
#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    coords: Option<Coordinates>,
}

impl FixedLocator {
    pub fn new(coords: Option<Coordinates>) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl Geolocator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        self.coords.ok_or(GeolocationError::Unavailable)
    }
}

/// How a `locate` request found its location.
#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    Located(Coordinates),
    /// Position unavailable; the default city was shown instead.
    Fallback { reason: GeolocationError, city: String },
}

/// A fetch issued by [`Dashboard::begin`]. It owns what it needs, so several
/// can run at once while the dashboard stays free to issue newer ones.
#[derive(Debug)]
pub struct PendingFetch {
    ticket: RequestTicket,
    query: LocationQuery,
    client: Arc<WeatherClient>,
}

impl PendingFetch {
    pub fn ticket(&self) -> RequestTicket {
        self.ticket
    }

    pub fn query(&self) -> &LocationQuery {
        &self.query
    }

    /// Perform the fetch. Hand the result to [`Dashboard::complete`].
    pub async fn run(self) -> (RequestTicket, Result<WeatherSnapshot, FetchError>) {
        let result = self.client.fetch(&self.query).await;
        (self.ticket, result)
    }
}

/// Controller for search, locate and unit toggling.
///
/// `Tz` is the time zone forecast days are grouped in. `search` and `locate`
/// hold `&mut self` for the whole request; front ends that keep several
/// requests in flight use [`begin`](Self::begin) and
/// [`complete`](Self::complete) instead.
#[derive(Debug)]
pub struct Dashboard<Tz: TimeZone> {
    client: Arc<WeatherClient>,
    geolocator: Box<dyn Geolocator>,
    default_city: String,
    geolocation_timeout: Duration,
    units_file: Option<PathBuf>,
    tz: Tz,
    state: AppState,
}

impl<Tz: TimeZone> Dashboard<Tz> {
    pub fn new(
        client: WeatherClient,
        geolocator: Box<dyn Geolocator>,
        tz: Tz,
        units: UnitPreference,
    ) -> Self {
        Self {
            client: Arc::new(client),
            geolocator,
            default_city: DEFAULT_CITY.to_string(),
            geolocation_timeout: GEOLOCATION_TIMEOUT,
            units_file: None,
            tz,
            state: AppState::new(units),
        }
    }

    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        self.default_city = city.into();
        self
    }

    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    /// Save every unit toggle to the config file at `path`.
    pub fn with_units_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.units_file = Some(path.into());
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Flip the unit preference and persist it when a units file is set.
    /// If saving fails the preference is left as it was.
    pub fn toggle_units(&mut self) -> anyhow::Result<UnitPreference> {
        let units = self.state.toggle_units();
        let saved = match &self.units_file {
            Some(path) => Config::store_units(path, units),
            None => Ok(()),
        };
        if let Err(err) = saved {
            self.state.toggle_units();
            return Err(err);
        }
        Ok(units)
    }

    /// Fetch by city name. On failure the cached data stays as it was.
    pub async fn search(&mut self, city: &str) -> Result<(), FetchError> {
        let query = LocationQuery::city(city)?;
        self.load(query).await
    }

    /// Fetch for the user's position, or for the default city when the
    /// position cannot be obtained.
    pub async fn locate(&mut self) -> Result<LocateOutcome, FetchError> {
        let located =
            match tokio::time::timeout(self.geolocation_timeout, self.geolocator.locate()).await {
                Ok(result) => result,
                Err(_) => Err(GeolocationError::Timeout),
            };

        match located {
            Ok(coords) => {
                self.load(LocationQuery::ByCoordinates(coords)).await?;
                Ok(LocateOutcome::Located(coords))
            }
            Err(reason) => {
                tracing::warn!(
                    "Geolocation failed ({reason}), falling back to {}",
                    self.default_city
                );
                let city = self.default_city.clone();
                self.search(&city).await?;
                Ok(LocateOutcome::Fallback { reason, city })
            }
        }
    }

    /// Issue a request for `query`. Any earlier pending request becomes stale.
    pub fn begin(&mut self, query: LocationQuery) -> PendingFetch {
        PendingFetch {
            ticket: self.state.begin_request(),
            query,
            client: Arc::clone(&self.client),
        }
    }

    /// Apply the result of a [`PendingFetch`]. Returns `Ok(false)` when a
    /// newer request was issued since `ticket`; stale results and stale
    /// errors are both dropped.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<WeatherSnapshot, FetchError>,
    ) -> Result<bool, FetchError> {
        if !self.state.is_latest(ticket) {
            tracing::debug!("Ignoring outcome of superseded request {}", ticket.0);
            return Ok(false);
        }

        let snapshot = result?;
        let view = ViewModel::build(&snapshot, &self.tz);
        let place = snapshot.current.place_name.clone();
        let applied = self.state.apply(ticket, snapshot, view);
        if applied {
            tracing::info!("Showing weather for {place}");
        }
        Ok(applied)
    }

    async fn load(&mut self, query: LocationQuery) -> Result<(), FetchError> {
        let (ticket, result) = self.begin(query).run().await;
        self.complete(ticket, result)?;
        Ok(())
    }
}
