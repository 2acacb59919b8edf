//! Collapse 3-hour forecast samples into per-day summaries.

use chrono::{NaiveDate, TimeZone};

use crate::model::{DailyForecast, ForecastEntry};

/// Number of upcoming days shown after today.
pub const FORECAST_DAYS: usize = 5;

/// Group `entries` by calendar date in `tz` and summarize the days after
/// the first one.
///
/// The first group is treated as the rest of today and dropped, so fewer
/// than two distinct dates yield an empty result. Groups keep the order in
/// which their dates first appear.
pub fn aggregate<Tz: TimeZone>(entries: &[ForecastEntry], tz: &Tz) -> Vec<DailyForecast> {
    let mut groups: Vec<(NaiveDate, Vec<&ForecastEntry>)> = Vec::new();

    for entry in entries {
        let date = entry.timestamp.with_timezone(tz).date_naive();
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, samples)) => samples.push(entry),
            None => groups.push((date, vec![entry])),
        }
    }

    groups
        .into_iter()
        .skip(1)
        .take(FORECAST_DAYS)
        .filter_map(|(date, samples)| summarize(date, &samples))
        .collect()
}

fn summarize(date: NaiveDate, samples: &[&ForecastEntry]) -> Option<DailyForecast> {
    let representative = samples.get(samples.len() / 2)?;

    let high_c = samples
        .iter()
        .map(|s| s.temp_max_c)
        .fold(f64::NEG_INFINITY, f64::max);
    let low_c = samples
        .iter()
        .map(|s| s.temp_min_c)
        .fold(f64::INFINITY, f64::min);

    Some(DailyForecast {
        date,
        high_c,
        low_c,
        icon: representative.icon.clone(),
    })
}
