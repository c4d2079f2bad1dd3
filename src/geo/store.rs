// src/geo/store.rs
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::db::connection::Database;
use crate::db::listings::select_studio_listings;
use crate::geo::error::PipelineError;
use crate::geo::model::RawListing;

/// Where listing records come from. Implementations may pre-filter to
/// studio candidates; the listing pass applies the studio rule either way.
pub trait ListingStore {
    fn load_listings(&self) -> Result<Vec<RawListing>, PipelineError>;
}

/// A JSON array of listing records, read in full on every call.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ListingStore for JsonFileStore {
    fn load_listings(&self) -> Result<Vec<RawListing>, PipelineError> {
        read_listing_file(&self.path)
    }
}

pub fn read_listing_file(path: &std::path::Path) -> Result<Vec<RawListing>, PipelineError> {
    let file = File::open(path).map_err(|e| {
        PipelineError::StoreUnreadable(format!("open {}: {e}", path.display()))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        PipelineError::StoreUnreadable(format!("parse {}: {e}", path.display()))
    })
}

/// The `apartments` table, queried for studio rows.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl ListingStore for SqliteStore {
    fn load_listings(&self) -> Result<Vec<RawListing>, PipelineError> {
        select_studio_listings(&self.db).map_err(|e| PipelineError::StoreUnreadable(e.to_string()))
    }
}
