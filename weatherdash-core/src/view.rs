use chrono::TimeZone;
use serde::Serialize;

use crate::{
    advisory,
    forecast,
    model::{CurrentConditions, DailyForecast, WeatherSnapshot},
};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Everything the renderer needs for one successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
    pub advisories: Vec<String>,
}

impl ViewModel {
    /// Derive the view-model, grouping forecast days in `tz`.
    pub fn build<Tz: TimeZone>(snapshot: &WeatherSnapshot, tz: &Tz) -> Self {
        Self {
            current: snapshot.current.clone(),
            daily: forecast::aggregate(&snapshot.forecast, tz),
            advisories: advisory::generate(&snapshot.current),
        }
    }
}

/// Large icon for the current conditions panel.
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}

/// Small icon for forecast cards.
pub fn small_icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}.png")
}
