// src/tests/router_tests/api_tests.rs

use crate::cli::export_layers;
use crate::router::handle;
use crate::tests::utils::{
    get, make_state, read_body, sample_elements, sample_listings, StaticListings, StaticPois,
    UnreachablePois,
};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

fn features(body: &str) -> Vec<Value> {
    let doc: Value = serde_json::from_str(body).unwrap();
    assert_eq!(doc["type"], "FeatureCollection");
    doc["features"].as_array().unwrap().clone()
}

#[test]
fn pois_endpoint_returns_classified_features() {
    let state = make_state(
        StaticPois(sample_elements()),
        StaticListings(sample_listings()),
    );

    let mut resp = handle(get("/api/pois"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/json"
    );

    let features = features(&read_body(&mut resp));
    assert_eq!(features.len(), 2);

    assert_eq!(features[0]["properties"]["category"], "nightclub");
    assert_eq!(features[0]["properties"]["id"], "osm-node-101");
    assert_eq!(features[0]["geometry"]["coordinates"][0], -87.6336);
    assert_eq!(features[0]["geometry"]["coordinates"][1], 41.8906);

    assert_eq!(features[1]["properties"]["category"], "bjj");
    assert_eq!(
        features[1]["properties"]["description"],
        "Brazilian Jiu-Jitsu Academy"
    );
    assert_eq!(features[1]["geometry"]["coordinates"][0], -87.6470);
}

#[test]
fn studios_endpoint_returns_only_studios() {
    let state = make_state(
        StaticPois(sample_elements()),
        StaticListings(sample_listings()),
    );

    let mut resp = handle(get("/api/studios"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let features = features(&read_body(&mut resp));
    assert_eq!(features.len(), 1);

    let props = &features[0]["properties"];
    assert_eq!(props["id"], "apt-studio");
    assert_eq!(props["category"], "studio");
    assert_eq!(props["price"], 1950);
    assert_eq!(props["priceRange"], "$1,500 - $2,200");
    assert_eq!(props["neighborhood"], "The Loop");
    assert_eq!(props["url"], "https://example.com/wabash");
    assert_eq!(features[0]["geometry"]["coordinates"][0], -87.6262);
}

#[test]
fn upstream_failure_is_a_json_error_not_an_empty_collection() {
    let state = make_state(UnreachablePois, StaticListings(sample_listings()));

    let mut resp = handle(get("/api/pois"), &state).unwrap();
    assert_eq!(resp.status(), 502);

    let doc: Value = serde_json::from_str(&read_body(&mut resp)).unwrap();
    assert_eq!(doc["error"], "Failed to fetch POIs");
    assert!(doc["details"].as_str().unwrap().contains("429"));
    assert!(doc.get("features").is_none());

    // the listing pass does not care
    let resp = handle(get("/api/studios"), &state).unwrap();
    assert_eq!(resp.status(), 200);
}

#[test]
fn unreadable_store_is_a_500_json_error() {
    let state = make_state(
        StaticPois(sample_elements()),
        StaticListings(serde_json::json!({"not": "an array"})),
    );

    let mut resp = handle(get("/api/studios"), &state).unwrap();
    assert_eq!(resp.status(), 500);

    let doc: Value = serde_json::from_str(&read_body(&mut resp)).unwrap();
    assert_eq!(doc["error"], "Failed to fetch studio apartments");
}

#[test]
fn empty_upstream_is_an_empty_collection() {
    let state = make_state(
        StaticPois(serde_json::json!([])),
        StaticListings(serde_json::json!([])),
    );

    let mut resp = handle(get("/api/pois"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(features(&read_body(&mut resp)).is_empty());
}

#[test]
fn unchanged_data_gives_identical_bodies_and_etags() {
    let state = make_state(
        StaticPois(sample_elements()),
        StaticListings(sample_listings()),
    );

    let mut first = handle(get("/api/pois"), &state).unwrap();
    let mut second = handle(get("/api/pois"), &state).unwrap();

    let etag = first.headers().get("ETag").unwrap().clone();
    assert_eq!(&etag, second.headers().get("ETag").unwrap());
    assert_eq!(read_body(&mut first), read_body(&mut second));

    let mut req = get("/api/pois");
    req.headers_mut().insert("If-None-Match", etag.clone());
    let mut resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 304);
    assert!(read_body(&mut resp).is_empty());

    let mut req = get("/api/pois");
    req.headers_mut()
        .insert("If-None-Match", "\"stale\"".parse().unwrap());
    assert_eq!(handle(req, &state).unwrap().status(), 200);
}

#[test]
fn export_writes_both_layers() {
    let state = make_state(
        StaticPois(sample_elements()),
        StaticListings(sample_listings()),
    );
    let dir = std::env::temp_dir().join(format!(
        "export_test_{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));

    export_layers(&state, &dir).unwrap();

    let pois = std::fs::read_to_string(dir.join("pois.geojson")).unwrap();
    let studios = std::fs::read_to_string(dir.join("studios.geojson")).unwrap();
    assert_eq!(features(&pois).len(), 2);
    assert_eq!(features(&studios).len(), 1);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn export_fails_when_a_pass_fails_but_keeps_the_other_layer() {
    let state = make_state(UnreachablePois, StaticListings(sample_listings()));
    let dir = std::env::temp_dir().join(format!(
        "export_fail_{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));

    assert!(export_layers(&state, &dir).is_err());
    assert!(dir.join("studios.geojson").exists());
    assert!(!dir.join("pois.geojson").exists());

    std::fs::remove_dir_all(dir).ok();
}
