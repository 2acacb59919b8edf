use thiserror::Error;

/// Rejected user input for a weather request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("City name must not be empty")]
    EmptyCity,
    #[error("Latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("Longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// Failure of a weather or geocoding request.
///
/// `Network` and `Status` cover transport problems and non-success
/// responses; `Malformed` is a success response whose body did not match
/// the expected payload. Callers treat all of them the same way.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("HTTP {status}")]
    Malformed { status: u16, detail: String },
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl FetchError {
    /// HTTP status attached to the failure, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Malformed { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            Self::Query(_) => None,
        }
    }
}

/// Reasons the platform could not hand out the user's position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not available")]
    Unavailable,
    #[error("Location permission denied")]
    Denied,
    #[error("Location request timed out")]
    Timeout,
}
