#![allow(dead_code)]

use serde_json::{Value, json};
use std::sync::Arc;
use weatherdash_core::{
    LocalityResolver, WeatherClient,
    geocode::{NominatimClient, OpenWeatherGeocoder},
    provider::openweather::OpenWeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const API_KEY: &str = "TEST_KEY";
pub const USER_AGENT: &str = "weatherdash-tests/1.0";

/// 2026-10-19T12:00:00Z
pub const BASE_TS: i64 = 1_792_411_200;

pub fn geocoder(server: &MockServer) -> Arc<OpenWeatherGeocoder> {
    Arc::new(
        OpenWeatherGeocoder::with_base_url(API_KEY.to_string(), format!("{}/geo", server.uri()))
            .expect("geocoder"),
    )
}

pub fn nominatim(server: &MockServer) -> Arc<NominatimClient> {
    Arc::new(
        NominatimClient::with_base_url(USER_AGENT, format!("{}/osm", server.uri()))
            .expect("nominatim client"),
    )
}

pub fn tiered_resolver(server: &MockServer) -> LocalityResolver {
    LocalityResolver::tiered(geocoder(server), nominatim(server))
}

pub fn weather_client(server: &MockServer) -> WeatherClient {
    let provider = OpenWeatherProvider::with_base_url(API_KEY.to_string(), server.uri())
        .expect("provider");
    WeatherClient::new(Arc::new(provider), tiered_resolver(server))
}

pub fn current_payload(name: &str, country: &str, main: &str, temp: f64) -> Value {
    json!({
        "name": name,
        "main": {"temp": temp, "feels_like": temp - 0.5, "humidity": 60},
        "weather": [{"main": main, "description": format!("{} today", main.to_lowercase()), "icon": "04d"}],
        "wind": {"speed": 3.0},
        "sys": {"country": country, "sunrise": BASE_TS - 6 * 3600, "sunset": BASE_TS + 6 * 3600}
    })
}

/// Forty 3-hour samples starting at [`BASE_TS`], covering six UTC dates.
pub fn forecast_payload() -> Value {
    let list: Vec<Value> = (0..40)
        .map(|i| {
            json!({
                "dt": BASE_TS + i * 3 * 3600,
                "main": {"temp_max": 15.0 + i as f64 * 0.1, "temp_min": 9.0 + i as f64 * 0.1},
                "weather": [{"main": "Clouds", "description": "overcast clouds", "icon": format!("{:02}d", i)}]
            })
        })
        .collect();
    json!({ "cod": "200", "list": list })
}

pub async fn mount_city(server: &MockServer, city: &str, current: Value) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(current))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .mount(server)
        .await;
}

pub async fn mount_coordinates(server: &MockServer, current: Value) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "17.4483"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "17.4483"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .mount(server)
        .await;
}

pub fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({"cod": "404", "message": "city not found"}))
}
