use crate::{
    error::FetchError,
    model::{CurrentConditions, ForecastEntry, LocationQuery},
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use std::{fmt::Debug, time::Duration};

pub mod openweather;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of current conditions and 3-hour forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, FetchError>;

    /// Forecast samples in chronological order.
    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastEntry>, FetchError>;
}

/// HTTP client shared by the weather and geocoding providers.
pub(crate) fn http_client(user_agent: Option<&str>) -> Result<Client, FetchError> {
    let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);
    if let Some(agent) = user_agent {
        builder = builder.user_agent(agent);
    }
    Ok(builder.build()?)
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

/// Read a response body as JSON.
///
/// Non-success statuses become [`FetchError::Status`] carrying the body's
/// `message` field, or `"HTTP {status}"` when there is none.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiMessage>(&body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|err| FetchError::Malformed {
        status: status.as_u16(),
        detail: err.to_string(),
    })
}
