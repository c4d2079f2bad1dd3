// src/tests/router_tests/page_tests.rs

use crate::db::listings::replace_all_listings;
use crate::geo::model::RawListing;
use crate::router::handle;
use crate::responses::html_error_response;
use crate::tests::utils::{
    get, make_state, read_body, sample_elements, sample_listings, StaticListings, StaticPois,
};

#[test]
fn home_and_health() {
    let state = make_state(
        StaticPois(sample_elements()),
        StaticListings(sample_listings()),
    );

    let mut resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(read_body(&mut resp).contains("/dashboard"));

    let mut resp = handle(get("/health"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(read_body(&mut resp), "ok");
}

#[test]
fn dashboard_shows_listing_counts() {
    let state = make_state(
        StaticPois(sample_elements()),
        StaticListings(sample_listings()),
    );
    let listings: Vec<RawListing> = serde_json::from_value(sample_listings()).unwrap();
    replace_all_listings(&state.db, &listings).unwrap();

    let mut resp = handle(get("/dashboard"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    assert!(body.contains("Apartments imported: <strong>2</strong>"), "{body}");
    assert!(body.contains("Studio listings: <strong>1</strong>"), "{body}");
    assert!(body.contains("/dashboard/map"));
}

#[test]
fn map_page_loads_both_feeds() {
    let state = make_state(
        StaticPois(sample_elements()),
        StaticListings(sample_listings()),
    );

    let mut resp = handle(get("/dashboard/map"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    assert!(body.contains("Location Explorer"));
    assert!(body.contains("id=\"map\""));
    assert!(body.contains("data-layer=\"studio\""));
}

#[test]
fn unknown_route_is_404_page() {
    let state = make_state(
        StaticPois(sample_elements()),
        StaticListings(sample_listings()),
    );

    let err = handle(get("/admin"), &state).unwrap_err();
    let mut resp = html_error_response(err);
    assert_eq!(resp.status(), 404);
    assert!(read_body(&mut resp).contains("Error 404"));
}
