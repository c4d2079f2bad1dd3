use crate::db::connection::Database;
use crate::errors::ServerError;
use crate::geo::model::{
    ListingCoordinates, ListingLocation, RawListing, RentRange, UnitModel,
};
use rusqlite::types::Type;
use rusqlite::{params, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;

const IMPORT_BATCH_SIZE: usize = 100;

const SELECT_COLUMNS: &str = r#"
    id, property_name, url,
    full_address, state, city, neighborhood, postal_code, street_address,
    latitude, longitude,
    rent_min, rent_max, beds, baths, sqft,
    models, transit_and_poi, scores, amenities, fees, schools, contact, photos, breadcrumbs,
    description, neighborhood_description, is_verified, scraped_at
"#;

fn to_json<T: Serialize>(value: &Option<T>) -> Result<Option<String>, ServerError> {
    value
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| ServerError::DbError(format!("encode JSON column: {e}")))
}

fn json_col<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<Option<T>> {
    let Some(text) = row.get::<_, Option<String>>(idx)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn listing_mapper(row: &Row) -> rusqlite::Result<RawListing> {
    Ok(RawListing {
        id: row.get(0)?,
        property_name: row.get(1)?,
        url: row.get(2)?,
        location: ListingLocation {
            full_address: row.get(3)?,
            state: row.get(4)?,
            city: row.get(5)?,
            neighborhood: row.get(6)?,
            postal_code: row.get(7)?,
            street_address: row.get(8)?,
        },
        coordinates: ListingCoordinates {
            latitude: Some(row.get(9)?),
            longitude: Some(row.get(10)?),
        },
        rent: RentRange {
            min: row.get(11)?,
            max: row.get(12)?,
        },
        beds: row.get(13)?,
        baths: row.get(14)?,
        sqft: row.get(15)?,
        models: json_col::<Vec<UnitModel>>(row, 16)?,
        transit_and_poi: json_col(row, 17)?,
        scores: json_col(row, 18)?,
        amenities: json_col(row, 19)?,
        fees: json_col(row, 20)?,
        schools: json_col(row, 21)?,
        contact: json_col(row, 22)?,
        photos: json_col(row, 23)?,
        breadcrumbs: json_col(row, 24)?,
        description: row.get(25)?,
        neighborhood_description: row.get(26)?,
        is_verified: Some(row.get(27)?),
        scraped_at: row.get(28)?,
    })
}

/// Wipe the table and load `listings` in batches, one transaction each.
/// The wipe commits together with the first batch, so a failing first
/// batch leaves the previous rows in place.
/// Records without both coordinates are skipped. Returns rows written.
pub fn replace_all_listings(db: &Database, listings: &[RawListing]) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        let mut batches: Vec<&[RawListing]> = listings.chunks(IMPORT_BATCH_SIZE).collect();
        if batches.is_empty() {
            batches.push(&[]);
        }
        let total = batches.len();
        let mut imported = 0;

        for (n, batch) in batches.into_iter().enumerate() {
            tracing::info!("importing batch {}/{}", n + 1, total);

            let tx = conn
                .transaction()
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            if n == 0 {
                tx.execute("DELETE FROM apartments", [])
                    .map_err(|e| ServerError::DbError(format!("clear apartments failed: {e}")))?;
            }

            for apt in batch {
                let (Some(latitude), Some(longitude)) =
                    (apt.coordinates.latitude, apt.coordinates.longitude)
                else {
                    tracing::warn!(id = %apt.id, "skipping listing without coordinates");
                    continue;
                };

                let inserted = tx.execute(
                    r#"
                    INSERT INTO apartments (
                        id, property_name, url,
                        full_address, state, city, neighborhood, postal_code, street_address,
                        latitude, longitude,
                        rent_min, rent_max, beds, baths, sqft,
                        models, transit_and_poi, scores, amenities, fees, schools, contact, photos, breadcrumbs,
                        description, neighborhood_description, is_verified, scraped_at
                    ) VALUES (
                        ?1, ?2, ?3,
                        ?4, ?5, ?6, ?7, ?8, ?9,
                        ?10, ?11,
                        ?12, ?13, ?14, ?15, ?16,
                        ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25,
                        ?26, ?27, ?28, ?29
                    )
                    ON CONFLICT(id) DO NOTHING
                    "#,
                    params![
                        apt.id,
                        apt.property_name,
                        apt.url,
                        // address
                        apt.location.full_address,
                        apt.location.state,
                        apt.location.city,
                        apt.location.neighborhood,
                        apt.location.postal_code,
                        apt.location.street_address,
                        latitude,
                        longitude,
                        // unit facts
                        apt.rent.min,
                        apt.rent.max,
                        apt.beds,
                        apt.baths,
                        apt.sqft,
                        // passthrough blobs
                        to_json(&apt.models)?,
                        to_json(&apt.transit_and_poi)?,
                        to_json(&apt.scores)?,
                        to_json(&apt.amenities)?,
                        to_json(&apt.fees)?,
                        to_json(&apt.schools)?,
                        to_json(&apt.contact)?,
                        to_json(&apt.photos)?,
                        to_json(&apt.breadcrumbs)?,
                        apt.description,
                        apt.neighborhood_description,
                        apt.is_verified.unwrap_or(false),
                        apt.scraped_at,
                    ],
                )
                .map_err(|e| ServerError::DbError(format!("insert {} failed: {e}", apt.id)))?;

                if inserted == 0 {
                    tracing::warn!(id = %apt.id, "duplicate listing id, keeping first");
                }
                imported += inserted;
            }

            tx.commit()
                .map_err(|e| ServerError::DbError(e.to_string()))?;
        }

        Ok(imported)
    })
}

pub fn count_listings(db: &Database) -> Result<i64, ServerError> {
    db.with_conn(|conn| {
        conn.query_row("SELECT COUNT(*) FROM apartments", [], |r| r.get(0))
            .map_err(|e| ServerError::DbError(format!("count apartments failed: {e}")))
    })
}

pub fn count_studio_listings(db: &Database) -> Result<i64, ServerError> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT COUNT(*) FROM apartments WHERE lower(beds) LIKE '%studio%'",
            [],
            |r| r.get(0),
        )
        .map_err(|e| ServerError::DbError(format!("count studios failed: {e}")))
    })
}

/// Rows whose bedroom descriptor mentions "studio" (any case), by id.
pub fn select_studio_listings(db: &Database) -> Result<Vec<RawListing>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM apartments WHERE lower(beds) LIKE '%studio%' ORDER BY id"
            ))
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], listing_mapper)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}
