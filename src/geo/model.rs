use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::geo::classify::Category;

// Overpass response
//  └── elements[]
//       ├── type            node | way | relation
//       ├── id
//       ├── lat / lon       nodes only
//       ├── center          ways/relations ("out center")
//       │    ├── lat
//       │    └── lon
//       └── tags            free-form string map

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<RawPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Centroid>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Centroid {
    pub lat: f64,
    pub lon: f64,
}

impl RawPoint {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

// Listing file record (camelCase on the wire)
//  ├── id, propertyName, url
//  ├── location      fullAddress, state, city, neighborhood, postalCode, streetAddress
//  ├── coordinates   latitude, longitude
//  ├── rent          min, max
//  ├── beds, baths, sqft
//  ├── models[]      modelName, rentLabel, details[]
//  └── opaque blobs  transitAndPOI, scores, amenities, fees, schools, contact, photos, ...

/// Scraped records write `null` where a section is empty; read it as the
/// section's default instead of rejecting the whole file.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub id: String,
    pub property_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: ListingLocation,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: ListingCoordinates,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rent: RentRange,
    #[serde(default)]
    pub beds: Option<String>,
    #[serde(default)]
    pub baths: Option<String>,
    #[serde(default)]
    pub sqft: Option<String>,
    #[serde(default)]
    pub models: Option<Vec<UnitModel>>,

    #[serde(default, rename = "transitAndPOI")]
    pub transit_and_poi: Option<Value>,
    #[serde(default)]
    pub scores: Option<Value>,
    #[serde(default)]
    pub amenities: Option<Value>,
    #[serde(default)]
    pub fees: Option<Value>,
    #[serde(default)]
    pub schools: Option<Value>,
    #[serde(default)]
    pub contact: Option<Value>,
    #[serde(default)]
    pub photos: Option<Value>,
    #[serde(default)]
    pub breadcrumbs: Option<Value>,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub neighborhood_description: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub scraped_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingLocation {
    #[serde(deserialize_with = "null_as_default")]
    pub full_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub neighborhood: String,
    #[serde(deserialize_with = "null_as_default")]
    pub postal_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub street_address: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Whole currency units; either bound may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RentRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitModel {
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub rent_label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: Vec<String>,
    /// Remaining source fields, kept so the record survives a DB round trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// GeoJSON position order: longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapFeature {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub position: Position,
    pub attributes: FeatureAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureAttributes {
    Poi {
        amenity: Option<String>,
        leisure: Option<String>,
        sport: Option<String>,
    },
    Listing(ListingAttributes),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingAttributes {
    pub address: String,
    pub neighborhood: String,
    pub price: Option<u64>,
    pub price_range: Option<String>,
    pub beds: Option<String>,
    pub baths: Option<String>,
    pub sqft: Option<String>,
    pub url: Option<String>,
}

/// One map layer worth of features, built fresh on every pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapLayer {
    pub features: Vec<MapFeature>,
}

impl MapLayer {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn count(&self, category: Category) -> usize {
        self.features
            .iter()
            .filter(|f| f.category == category)
            .count()
    }

    pub fn to_geojson(&self) -> geojson::FeatureCollection {
        geojson::FeatureCollection {
            bbox: None,
            features: self.features.iter().map(MapFeature::to_geojson).collect(),
            foreign_members: None,
        }
    }
}

impl MapFeature {
    pub fn to_geojson(&self) -> geojson::Feature {
        let mut props = Map::new();
        props.insert("id".into(), Value::from(self.id.clone()));
        props.insert("name".into(), Value::from(self.name.clone()));
        props.insert("category".into(), Value::from(self.category.as_str()));
        props.insert("description".into(), Value::from(self.description.clone()));

        match &self.attributes {
            FeatureAttributes::Poi {
                amenity,
                leisure,
                sport,
            } => {
                props.insert("amenity".into(), Value::from(amenity.clone()));
                props.insert("leisure".into(), Value::from(leisure.clone()));
                props.insert("sport".into(), Value::from(sport.clone()));
            }
            FeatureAttributes::Listing(l) => {
                props.insert("address".into(), Value::from(l.address.clone()));
                props.insert("neighborhood".into(), Value::from(l.neighborhood.clone()));
                props.insert("price".into(), Value::from(l.price));
                props.insert("priceRange".into(), Value::from(l.price_range.clone()));
                props.insert("beds".into(), Value::from(l.beds.clone()));
                props.insert("baths".into(), Value::from(l.baths.clone()));
                props.insert("sqft".into(), Value::from(l.sqft.clone()));
                props.insert("url".into(), Value::from(l.url.clone()));
            }
        }

        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                self.position.lon,
                self.position.lat,
            ]))),
            id: Some(geojson::feature::Id::String(self.id.clone())),
            properties: Some(props),
            foreign_members: None,
        }
    }
}
