use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app::AppState;
use crate::db::listings::{count_listings, count_studio_listings, replace_all_listings};
use crate::db::Database;
use crate::errors::ServerError;
use crate::geo::model::MapLayer;
use crate::geo::store::read_listing_file;
use crate::geo::{run_all, PipelineError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown command '{0}' (expected serve, import or export)")]
    UnknownCommand(String),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ImportSummary {
    pub read: usize,
    pub imported: usize,
    pub total: i64,
    pub studios: i64,
}

/// Replace the listing table with the contents of a listing JSON file.
pub fn import_listings(db: &Database, path: &Path) -> Result<ImportSummary, CliError> {
    tracing::info!(path = %path.display(), "reading listing file");
    let listings = read_listing_file(path)?;
    tracing::info!("found {} apartments to import", listings.len());

    let imported = replace_all_listings(db, &listings)?;
    let summary = ImportSummary {
        read: listings.len(),
        imported,
        total: count_listings(db)?,
        studios: count_studio_listings(db)?,
    };

    tracing::info!(
        total = summary.total,
        studios = summary.studios,
        "import complete"
    );
    Ok(summary)
}

/// Run both passes once and write `pois.geojson` / `studios.geojson`.
/// Either pass failing fails the command, after the other file is written.
pub fn export_layers(state: &AppState, out_dir: &Path) -> Result<(), CliError> {
    fs::create_dir_all(out_dir).map_err(|source| CliError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let results = run_all(state.poi_source.as_ref(), &state.bbox, state.listings.as_ref());

    let studios = write_layer(out_dir, "studios.geojson", results.studios);
    let pois = write_layer(out_dir, "pois.geojson", results.pois);
    pois.and(studios)
}

fn write_layer(
    out_dir: &Path,
    name: &str,
    layer: Result<MapLayer, PipelineError>,
) -> Result<(), CliError> {
    let layer = layer?;
    let path = out_dir.join(name);
    let body = serde_json::to_vec_pretty(&layer.to_geojson())
        .map_err(|_| CliError::Server(ServerError::InternalError))?;

    fs::write(&path, body).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), features = layer.len(), "layer written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn import_reports_counts() {
        let path = std::env::temp_dir().join(format!(
            "import_{}.json",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::write(
            &path,
            r#"[
                {"id": "1", "propertyName": "A", "coordinates": {"latitude": 41.9, "longitude": -87.6}, "beds": "Studio"},
                {"id": "2", "propertyName": "B", "coordinates": {"latitude": 41.9, "longitude": -87.6}, "beds": "1 Bed"},
                {"id": "3", "propertyName": "C", "beds": "Studio"}
            ]"#,
        )
        .unwrap();

        let db = Database::open(":memory:").unwrap();
        init_db(&db).unwrap();

        let summary = import_listings(&db, &path).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                read: 3,
                imported: 2,
                total: 2,
                studios: 1,
            }
        );
        fs::remove_file(path).ok();
    }

    #[test]
    fn import_missing_file_fails() {
        let db = Database::open(":memory:").unwrap();
        init_db(&db).unwrap();

        let err = import_listings(&db, Path::new("/nonexistent/apartments.json")).unwrap_err();
        assert!(matches!(
            err,
            CliError::Pipeline(PipelineError::StoreUnreadable(_))
        ));
    }
}
