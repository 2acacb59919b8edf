use chrono::{DateTime, TimeZone, Utc};
use std::fmt::{self, Write};
use weatherdash_core::{
    UnitPreference, ViewModel, advisory,
    units::{capitalize, format_humidity},
    view::{icon_url, small_icon_url},
};

/// Plain-text dashboard for `view`. `now` drives the date header; times are shown in `tz`.
pub fn render<Tz: TimeZone>(
    view: &ViewModel,
    units: UnitPreference,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<String, fmt::Error>
where
    Tz::Offset: fmt::Display,
{
    let current = &view.current;
    let mut out = String::new();

    writeln!(out, "{}", current.place_name)?;
    writeln!(out, "{}", now.with_timezone(tz).format("%A, %B %-d"))?;
    writeln!(out)?;
    writeln!(
        out,
        "{}  {}",
        units.format_temp(current.temperature_c),
        capitalize(&current.description)
    )?;
    if !current.icon.is_empty() {
        writeln!(out, "{}", icon_url(&current.icon))?;
    }
    writeln!(out, "{}", units.format_feels_like(current.feels_like_c))?;
    writeln!(out, "{}", format_humidity(current.humidity_pct))?;
    writeln!(out, "{}", units.format_wind(current.wind_speed_mps))?;
    writeln!(out, "Sunrise: {}", clock(current.sunrise, tz))?;
    writeln!(out, "Sunset: {}", clock(current.sunset, tz))?;
    writeln!(out)?;
    writeln!(out, "{}", advisory::tip_line(&view.advisories))?;

    if !view.daily.is_empty() {
        writeln!(out)?;
        for day in &view.daily {
            writeln!(
                out,
                "{:<4} {:>6} {:>6}  {}",
                day.weekday(),
                units.format_temp(day.high_c),
                units.format_temp(day.low_c),
                small_icon_url(&day.icon)
            )?;
        }
    }

    Ok(out)
}

fn clock<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    at.with_timezone(tz).format("%H:%M").to_string()
}
