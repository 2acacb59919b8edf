//! Unit conversion and display formatting.
//!
//! Fetched data is always metric; the [`UnitPreference`] only changes how
//! values are presented.

use serde::{Deserialize, Serialize};

const MPS_TO_KMH: f64 = 3.6;
const MPS_TO_MPH: f64 = 2.23694;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Celsius,
    Fahrenheit,
}

impl UnitPreference {
    pub fn from_celsius_flag(celsius: bool) -> Self {
        if celsius { Self::Celsius } else { Self::Fahrenheit }
    }

    pub fn is_celsius(self) -> bool {
        self == Self::Celsius
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Label of the control that switches to the other unit.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Celsius => "Show °F",
            Self::Fahrenheit => "Show °C",
        }
    }

    /// `"21°C"` or `"70°F"`.
    pub fn format_temp(self, celsius: f64) -> String {
        match self {
            Self::Celsius => format!("{}°C", round_half_up(celsius)),
            Self::Fahrenheit => format!("{}°F", round_half_up(to_fahrenheit(celsius))),
        }
    }

    pub fn format_feels_like(self, celsius: f64) -> String {
        format!("Feels like: {}", self.format_temp(celsius))
    }

    /// Wind follows the temperature system: km/h alongside Celsius, mph alongside Fahrenheit.
    pub fn format_wind(self, mps: f64) -> String {
        match self {
            Self::Celsius => format!("Wind: {} km/h", round_half_up(mps_to_kmh(mps))),
            Self::Fahrenheit => format!("Wind: {} mph", round_half_up(mps_to_mph(mps))),
        }
    }
}

pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * MPS_TO_KMH
}

pub fn mps_to_mph(mps: f64) -> f64 {
    mps * MPS_TO_MPH
}

/// Round to the nearest integer, with halves going up (`-2.5` becomes `-2`).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_humidity(pct: u8) -> String {
    format!("Humidity: {pct}%")
}

/// Upper-case the first character, e.g. "light rain" -> "Light rain".
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_temperatures_in_both_units() {
        assert_eq!(UnitPreference::Celsius.format_temp(21.4), "21°C");
        assert_eq!(UnitPreference::Fahrenheit.format_temp(21.4), "71°F");
        assert_eq!(UnitPreference::Celsius.format_feels_like(-3.6), "Feels like: -4°C");
    }

    #[test]
    fn rounding_sends_halves_up_and_avoids_negative_zero() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(UnitPreference::Celsius.format_temp(-0.4), "0°C");
    }

    #[test]
    fn wind_unit_follows_preference() {
        assert_eq!(UnitPreference::Celsius.format_wind(5.0), "Wind: 18 km/h");
        assert_eq!(UnitPreference::Fahrenheit.format_wind(5.0), "Wind: 11 mph");
    }

    #[test]
    fn toggle_label_names_the_other_unit() {
        assert_eq!(UnitPreference::Celsius.toggle_label(), "Show °F");
        assert_eq!(UnitPreference::Fahrenheit.toggle_label(), "Show °C");
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize("éclaircies"), "Éclaircies");
    }

    #[test]
    fn humidity_is_unit_independent() {
        assert_eq!(format_humidity(64), "Humidity: 64%");
    }

    proptest! {
        #[test]
        fn fahrenheit_matches_formula(c in -100.0f64..100.0) {
            prop_assert_eq!(to_fahrenheit(c), c * 9.0 / 5.0 + 32.0);
        }

        #[test]
        fn celsius_conversion_inverts_fahrenheit(c in -100.0f64..100.0) {
            prop_assert!((to_celsius(to_fahrenheit(c)) - c).abs() < 1e-9);
        }

        #[test]
        fn double_toggle_restores_every_string(
            c in -60.0f64..60.0,
            wind in 0.0f64..60.0,
            celsius in any::<bool>(),
        ) {
            let pref = UnitPreference::from_celsius_flag(celsius);
            let back = pref.toggled().toggled();
            prop_assert_eq!(back, pref);
            prop_assert_eq!(back.format_temp(c), pref.format_temp(c));
            prop_assert_eq!(back.format_wind(wind), pref.format_wind(wind));
        }
    }
}
