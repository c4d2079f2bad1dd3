use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

use crate::geo::overpass::{BoundingBox, DEFAULT_OVERPASS_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

fn invalid(var: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingSource {
    File(PathBuf),
    Database,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub database_path: String,
    pub overpass_url: Url,
    pub listing_source: ListingSource,
    pub listings_file: PathBuf,
    pub bbox: BoundingBox,
    pub mapbox_token: Option<String>,
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = get("BIND_ADDR", "127.0.0.1:3000")
            .parse::<SocketAddr>()
            .map_err(|e| invalid("BIND_ADDR", e))?;

        let max_workers = get("MAX_WORKERS", "8")
            .parse::<usize>()
            .map_err(|e| invalid("MAX_WORKERS", e))?;
        if max_workers == 0 {
            return Err(invalid("MAX_WORKERS", "must be at least 1"));
        }

        let overpass_url = Url::parse(&get("OVERPASS_URL", DEFAULT_OVERPASS_URL))
            .map_err(|e| invalid("OVERPASS_URL", e))?;

        let listings_file = PathBuf::from(get("LISTINGS_FILE", "apartments.json"));
        let listing_source = match get("LISTINGS_SOURCE", "file").to_lowercase().as_str() {
            "file" => ListingSource::File(listings_file.clone()),
            "database" | "db" => ListingSource::Database,
            other => return Err(invalid("LISTINGS_SOURCE", format!("unknown source '{other}'"))),
        };

        let bbox = match lookup("POI_BBOX") {
            Some(raw) => parse_bbox(&raw).map_err(|e| invalid("POI_BBOX", e))?,
            None => BoundingBox::default(),
        };

        Ok(Self {
            bind_addr,
            max_workers,
            database_path: get("DATABASE_PATH", "poi_map.sqlite3"),
            overpass_url,
            listing_source,
            listings_file,
            bbox,
            mapbox_token: lookup("MAPBOX_TOKEN").filter(|t| !t.trim().is_empty()),
        })
    }
}

/// "south,west,north,east" in degrees.
pub fn parse_bbox(raw: &str) -> Result<BoundingBox, String> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("'{}': {e}", p.trim())))
        .collect::<Result<_, _>>()?;

    let &[south, west, north, east] = parts.as_slice() else {
        return Err(format!("expected 4 values, got {}", parts.len()));
    };

    if !(-90.0..=90.0).contains(&south) || !(-90.0..=90.0).contains(&north) {
        return Err("latitude out of range".into());
    }
    if !(-180.0..=180.0).contains(&west) || !(-180.0..=180.0).contains(&east) {
        return Err("longitude out of range".into());
    }
    if south >= north || west >= east {
        return Err("south/west must be below north/east".into());
    }

    Ok(BoundingBox {
        south,
        west,
        north,
        east,
    })
}
