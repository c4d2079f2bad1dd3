// src/geo/normalize.rs

use crate::geo::classify::{Category, Classification};
use crate::geo::model::{
    FeatureAttributes, ListingAttributes, MapFeature, Position, RawListing, RawPoint,
};
use crate::geo::price::format_price_range;

/// Direct lat/lon when both are present, else the element's centroid.
/// Values are passed through untouched.
pub fn resolve_point_position(point: &RawPoint) -> Option<Position> {
    match (point.lat, point.lon) {
        (Some(lat), Some(lon)) => Some(Position { lon, lat }),
        _ => point.center.map(|c| Position {
            lon: c.lon,
            lat: c.lat,
        }),
    }
}

pub fn resolve_listing_position(listing: &RawListing) -> Option<Position> {
    let c = listing.coordinates;
    Some(Position {
        lon: c.longitude?,
        lat: c.latitude?,
    })
}

pub fn point_feature_id(point: &RawPoint) -> String {
    format!("osm-{}-{}", point.kind, point.id)
}

pub fn normalize_point(
    point: &RawPoint,
    classification: Classification,
    position: Position,
) -> MapFeature {
    MapFeature {
        id: point_feature_id(point),
        name: point.tag("name").unwrap_or("Unnamed").to_string(),
        category: classification.category,
        description: classification.description,
        position,
        attributes: FeatureAttributes::Poi {
            amenity: point.tag("amenity").map(str::to_string),
            leisure: point.tag("leisure").map(str::to_string),
            sport: point.tag("sport").map(str::to_string),
        },
    }
}

pub fn normalize_listing(listing: &RawListing, price: Option<u64>, position: Position) -> MapFeature {
    MapFeature {
        id: listing.id.clone(),
        name: listing.property_name.clone(),
        category: Category::Studio,
        description: listing.beds.clone().unwrap_or_default(),
        position,
        attributes: FeatureAttributes::Listing(ListingAttributes {
            address: listing.location.full_address.clone(),
            neighborhood: listing.location.neighborhood.clone(),
            price,
            price_range: format_price_range(&listing.rent),
            beds: listing.beds.clone(),
            baths: listing.baths.clone(),
            sqft: listing.sqft.clone(),
            url: listing.url.clone(),
        }),
    }
}
