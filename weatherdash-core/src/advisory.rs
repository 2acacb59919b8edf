//! Short recommendations derived from current conditions.

use crate::{model::CurrentConditions, units::mps_to_kmh};

pub const UMBRELLA: &str = "Carry an umbrella ☔ — there's rain expected.";
pub const SNOW: &str = "Snowy conditions ❄ — wear warm layers & be careful on roads.";
pub const HEAT: &str = "It's hot — stay hydrated 💧 and avoid prolonged sun exposure.";
pub const JACKET: &str = "It's chilly — wear a jacket 🧥.";
pub const WIND: &str = "Very windy 🌬 — secure loose items outdoors.";
pub const HUMIDITY: &str = "High humidity — it may feel muggy.";
pub const SUN: &str = "Clear skies 😎 — wear sunscreen if you're heading out.";
pub const DEFAULT: &str = "Have a great day! ☀";

const HOT_FEELS_LIKE_C: f64 = 30.0;
const CHILLY_TEMP_C: f64 = 10.0;
const WINDY_KMH: f64 = 45.0;
const MUGGY_HUMIDITY_PCT: u8 = 85;

/// Advisories for `current`, in rule order. Never empty.
pub fn generate(current: &CurrentConditions) -> Vec<String> {
    let condition = current.condition.to_lowercase();
    let has = |needle: &str| condition.contains(needle);

    let rules = [
        (has("rain") || has("drizzle") || has("thunder"), UMBRELLA),
        (has("snow"), SNOW),
        (current.feels_like_c >= HOT_FEELS_LIKE_C, HEAT),
        (current.temperature_c <= CHILLY_TEMP_C, JACKET),
        (mps_to_kmh(current.wind_speed_mps) >= WINDY_KMH, WIND),
        (current.humidity_pct >= MUGGY_HUMIDITY_PCT && !has("rain"), HUMIDITY),
        (has("clear"), SUN),
    ];

    let mut tips: Vec<String> = rules
        .into_iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, tip)| tip.to_string())
        .collect();

    if tips.is_empty() {
        tips.push(DEFAULT.to_string());
    }
    tips
}

/// Single-line rendering used by the tip panel.
pub fn tip_line(tips: &[String]) -> String {
    format!("Tip: {}", tips.join(" "))
}
