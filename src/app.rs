use crate::config::{Config, ListingSource};
use crate::db::Database;
use crate::geo::{
    BoundingBox, JsonFileStore, ListingStore, OverpassClient, PipelineError, PoiSource,
    SqliteStore,
};

/// Everything a request needs, built once at startup and shared by all
/// workers. The database handle is passed in, never reached for globally.
pub struct AppState {
    pub db: Database,
    pub poi_source: Box<dyn PoiSource + Send + Sync>,
    pub listings: Box<dyn ListingStore + Send + Sync>,
    pub listing_source_label: String,
    pub bbox: BoundingBox,
    pub mapbox_token: Option<String>,
}

impl AppState {
    pub fn from_config(config: &Config, db: Database) -> Result<Self, PipelineError> {
        let poi_source = Box::new(OverpassClient::new(config.overpass_url.clone())?);

        let (listings, listing_source_label): (Box<dyn ListingStore + Send + Sync>, String) =
            match &config.listing_source {
                ListingSource::File(path) => (
                    Box::new(JsonFileStore::new(path.clone())),
                    format!("file {}", path.display()),
                ),
                ListingSource::Database => (
                    Box::new(SqliteStore::new(db.clone())),
                    "database table apartments".to_string(),
                ),
            };

        Ok(Self {
            db,
            poi_source,
            listings,
            listing_source_label,
            bbox: config.bbox,
            mapbox_token: config.mapbox_token.clone(),
        })
    }
}
