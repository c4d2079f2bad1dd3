// src/geo/aggregate.rs

use crate::geo::classify::{classify_poi, is_studio, Category};
use crate::geo::error::PipelineError;
use crate::geo::model::MapLayer;
use crate::geo::normalize::{
    normalize_listing, normalize_point, resolve_listing_position, resolve_point_position,
};
use crate::geo::overpass::{BoundingBox, PoiSource};
use crate::geo::price::extract_price;
use crate::geo::store::ListingStore;

/// One POI query over `bbox`, every resolvable element classified and
/// normalized. Elements without a position are dropped. An upstream failure
/// fails the whole pass.
pub fn poi_pass(source: &dyn PoiSource, bbox: &BoundingBox) -> Result<MapLayer, PipelineError> {
    let points = source.fetch_points(bbox)?;
    let mut layer = MapLayer::default();
    let mut dropped = 0;

    for point in &points {
        let Some(position) = resolve_point_position(point) else {
            dropped += 1;
            continue;
        };

        let classification = classify_poi(
            point.tag("amenity"),
            point.tag("leisure"),
            point.tag("sport"),
            point.tag("name").unwrap_or("Unnamed"),
        );
        layer
            .features
            .push(normalize_point(point, classification, position));
    }

    tracing::info!(
        features = layer.len(),
        dropped,
        nightclubs = layer.count(Category::Nightclub),
        gyms = layer.count(Category::Gym),
        bjj = layer.count(Category::MartialArts),
        unknown = layer.count(Category::Unknown),
        "POI pass complete"
    );
    Ok(layer)
}

/// Every studio listing in the store, priced and normalized.
pub fn listing_pass(store: &dyn ListingStore) -> Result<MapLayer, PipelineError> {
    let listings = store.load_listings()?;
    let mut layer = MapLayer::default();

    for listing in &listings {
        if !listing.beds.as_deref().is_some_and(is_studio) {
            continue;
        }

        let Some(position) = resolve_listing_position(listing) else {
            tracing::warn!(id = %listing.id, "studio listing without coordinates, skipped");
            continue;
        };

        let price = extract_price(&listing.rent, listing.models.as_deref());
        layer
            .features
            .push(normalize_listing(listing, price, position));
    }

    tracing::info!(
        listings = listings.len(),
        studios = layer.len(),
        "listing pass complete"
    );
    Ok(layer)
}

pub struct PassResults {
    pub pois: Result<MapLayer, PipelineError>,
    pub studios: Result<MapLayer, PipelineError>,
}

/// Both passes side by side. Neither result depends on the other.
pub fn run_all(
    source: &(dyn PoiSource + Sync),
    bbox: &BoundingBox,
    store: &(dyn ListingStore + Sync),
) -> PassResults {
    std::thread::scope(|scope| {
        let pois = scope.spawn(|| poi_pass(source, bbox));
        let studios = listing_pass(store);

        let pois = pois
            .join()
            .unwrap_or_else(|_| Err(PipelineError::UpstreamUnavailable("POI pass panicked".into())));

        PassResults { pois, studios }
    })
}
