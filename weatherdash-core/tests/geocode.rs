mod common;

use common::*;
use serde_json::json;
use weatherdash_core::{Coordinates, LocalityResolver, geocode::UNKNOWN_LOCATION};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

fn coords() -> Coordinates {
    Coordinates::new(17.4483, 78.3915).expect("valid coords")
}

async fn mount_geo(server: &MockServer, limit: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/geo/reverse"))
        .and(query_param("limit", limit))
        .and(query_param("appid", API_KEY))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn nominatim_is_used_when_openweather_fails() {
    let server = MockServer::start().await;
    mount_geo(&server, "5", ResponseTemplate::new(500)).await;
    Mock::given(method("GET"))
        .and(path("/osm/reverse"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("addressdetails", "1"))
        .and(header("accept-language", "en"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "Madhapur, Hyderabad, Telangana, India",
            "address": {
                "suburb": "Madhapur",
                "city": "Hyderabad",
                "state": "Telangana",
                "country": "India"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let name = tiered_resolver(&server).resolve(coords()).await;

    assert_eq!(name, "Madhapur, Hyderabad");
}

#[tokio::test]
async fn empty_candidates_fall_through_to_top_place() {
    let server = MockServer::start().await;
    mount_geo(&server, "5", ResponseTemplate::new(200).set_body_json(json!([]))).await;
    Mock::given(method("GET"))
        .and(path("/osm/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Unable to geocode"})))
        .mount(&server)
        .await;
    mount_geo(
        &server,
        "1",
        ResponseTemplate::new(200).set_body_json(json!([{"name": "", "state": "Telangana"}])),
    )
    .await;

    let name = tiered_resolver(&server).resolve(coords()).await;

    assert_eq!(name, "Telangana");
}

#[tokio::test]
async fn malformed_first_tier_is_swallowed() {
    let server = MockServer::start().await;
    mount_geo(&server, "5", ResponseTemplate::new(200).set_body_string("not json")).await;
    Mock::given(method("GET"))
        .and(path("/osm/reverse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"address": {"town": "Shadnagar"}})),
        )
        .mount(&server)
        .await;

    let name = tiered_resolver(&server).resolve(coords()).await;

    assert_eq!(name, "Shadnagar");
}

#[tokio::test]
async fn every_tier_failing_yields_unknown_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let name = tiered_resolver(&server).resolve(coords()).await;

    assert_eq!(name, UNKNOWN_LOCATION);
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn unreachable_providers_yield_unknown_location() {
    let server = MockServer::start().await;
    let resolver = tiered_resolver(&server);
    drop(server);

    assert_eq!(resolver.resolve(coords()).await, UNKNOWN_LOCATION);
}

#[tokio::test]
async fn simple_mode_only_asks_for_the_top_candidate() {
    let server = MockServer::start().await;
    mount_geo(
        &server,
        "1",
        ResponseTemplate::new(200).set_body_json(json!([{"name": "Madhapur", "state": "Telangana"}])),
    )
    .await;

    let name = LocalityResolver::simple(geocoder(&server)).resolve(coords()).await;

    assert_eq!(name, "Madhapur");
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}
