pub mod aggregate;
pub mod classify;
pub mod error;
pub mod model;
pub mod normalize;
pub mod overpass;
pub mod price;
pub mod store;

pub use aggregate::{listing_pass, poi_pass, run_all};
pub use error::PipelineError;
pub use overpass::{BoundingBox, OverpassClient, PoiSource};
pub use store::{JsonFileStore, ListingStore, SqliteStore};
