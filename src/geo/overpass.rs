// src/geo/overpass.rs
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::geo::error::PipelineError;
use crate::geo::model::{OverpassResponse, RawPoint};

const USER_AGENT: &str = concat!("poi_map/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Fixed rectangular query window, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Downtown Chicago.
    pub const DOWNTOWN_CHICAGO: BoundingBox = BoundingBox {
        south: 41.85,
        west: -87.68,
        north: 41.92,
        east: -87.60,
    };

    /// Overpass order: south,west,north,east.
    pub fn to_overpass(&self) -> String {
        format!("{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::DOWNTOWN_CHICAGO
    }
}

/// Anything that can answer the bounding-box POI query.
pub trait PoiSource {
    fn fetch_points(&self, bbox: &BoundingBox) -> Result<Vec<RawPoint>, PipelineError>;
}

/// Overpass QL for nightclubs, gyms, fitness centres and BJJ academies.
/// `out center` makes the registry attach a centroid to area elements.
pub fn build_query(bbox: &BoundingBox) -> String {
    let bbox = bbox.to_overpass();
    let filters = [
        r#"["amenity"="nightclub"]"#,
        r#"["amenity"="gym"]"#,
        r#"["leisure"="fitness_centre"]"#,
        r#"["sport"="brazilian_jiu_jitsu"]"#,
        r#"["name"~"BJJ|jiu.?jitsu",i]"#,
    ];

    let mut query = String::from("[out:json][timeout:25];\n(\n");
    for filter in filters {
        for element in ["node", "way"] {
            query.push_str(&format!("  {element}{filter}({bbox});\n"));
        }
    }
    query.push_str(");\nout center;\n");
    query
}

pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    pub fn new(endpoint: Url) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PipelineError::UpstreamUnavailable(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    /// Single attempt; any transport error or non-2xx status fails the pass.
    pub fn query(&self, ql: &str) -> Result<OverpassResponse, PipelineError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(ql.to_string())
            .send()
            .map_err(|e| PipelineError::UpstreamUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(PipelineError::UpstreamUnavailable(format!(
                "Overpass HTTP {status}: {}",
                text.chars().take(200).collect::<String>()
            )));
        }

        resp.json::<OverpassResponse>()
            .map_err(|e| PipelineError::UpstreamUnavailable(format!("bad Overpass payload: {e}")))
    }
}

impl PoiSource for OverpassClient {
    fn fetch_points(&self, bbox: &BoundingBox) -> Result<Vec<RawPoint>, PipelineError> {
        let started = std::time::Instant::now();
        let data = self.query(&build_query(bbox))?;

        tracing::info!(
            elements = data.elements.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched POIs from Overpass"
        );
        Ok(data.elements)
    }
}
