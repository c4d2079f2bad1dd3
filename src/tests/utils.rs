use crate::app::AppState;
use crate::db::{init_db, Database};
use crate::geo::model::{RawListing, RawPoint};
use crate::geo::{BoundingBox, ListingStore, PipelineError, PoiSource};
use astra::{Body, Request, Response};
use http::Method;
use serde_json::{json, Value};
use std::io::Read;

pub struct StaticPois(pub Value);

impl PoiSource for StaticPois {
    fn fetch_points(&self, _bbox: &BoundingBox) -> Result<Vec<RawPoint>, PipelineError> {
        serde_json::from_value(self.0.clone())
            .map_err(|e| PipelineError::UpstreamUnavailable(e.to_string()))
    }
}

pub struct UnreachablePois;

impl PoiSource for UnreachablePois {
    fn fetch_points(&self, _bbox: &BoundingBox) -> Result<Vec<RawPoint>, PipelineError> {
        Err(PipelineError::UpstreamUnavailable("Overpass HTTP 429 Too Many Requests".into()))
    }
}

pub struct StaticListings(pub Value);

impl ListingStore for StaticListings {
    fn load_listings(&self) -> Result<Vec<RawListing>, PipelineError> {
        serde_json::from_value(self.0.clone())
            .map_err(|e| PipelineError::StoreUnreadable(e.to_string()))
    }
}

/// One nightclub, one ambiguous "BJJ Gym", one element with no position.
pub fn sample_elements() -> Value {
    json!([
        {"type": "node", "id": 101, "lat": 41.8906, "lon": -87.6336,
         "tags": {"amenity": "nightclub", "name": "Sound-Bar"}},
        {"type": "way", "id": 202, "center": {"lat": 41.8843, "lon": -87.6470},
         "tags": {"amenity": "gym", "name": "BJJ Gym"}},
        {"type": "relation", "id": 303, "tags": {"leisure": "fitness_centre"}}
    ])
}

/// One studio, one two-bedroom.
pub fn sample_listings() -> Value {
    json!([
        {"id": "apt-studio", "propertyName": "Wabash Lofts", "url": "https://example.com/wabash",
         "location": {"fullAddress": "30 E Wabash Ave, Chicago, IL 60603", "neighborhood": "The Loop"},
         "coordinates": {"latitude": 41.8819, "longitude": -87.6262},
         "rent": {"min": 1500, "max": 2200}, "beds": "Studio - 1 Bed",
         "models": [{"modelName": "S", "rentLabel": "$1,950/mo", "details": ["Studio", "1 Bath"]}]},
        {"id": "apt-2br", "propertyName": "Lake Towers",
         "coordinates": {"latitude": 41.8950, "longitude": -87.6150},
         "rent": {"min": 3000, "max": 3600}, "beds": "2 Beds"}
    ])
}

/// In-memory database with the production schema applied.
pub fn init_test_db() -> Database {
    let db = Database::open(":memory:").unwrap_or_else(|e| panic!("open failed: {e}"));
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn make_state(
    pois: impl PoiSource + Send + Sync + 'static,
    listings: impl ListingStore + Send + Sync + 'static,
) -> AppState {
    AppState {
        db: init_test_db(),
        poi_source: Box::new(pois),
        listings: Box::new(listings),
        listing_source_label: "test fixture".into(),
        bbox: BoundingBox::default(),
        mapbox_token: Some("pk.test".into()),
    }
}

pub fn get(path: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = path.parse().unwrap();
    req
}

pub fn read_body(resp: &mut Response) -> String {
    let mut body_bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut body_bytes)
        .unwrap();
    String::from_utf8(body_bytes).unwrap()
}
