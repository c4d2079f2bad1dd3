// responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use base64::Engine;
use sha2::{Digest, Sha256};

/// Strong validator for a response body: quoted base64url SHA-256.
/// Identical passes produce identical bodies, hence identical tags.
pub fn etag_for(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    format!(
        "\"{}\"",
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest)
    )
}

fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate == etag)
}

/// Serialize a feature collection; answer 304 when the client already
/// holds this exact body.
pub fn geojson_response(
    collection: &geojson::FeatureCollection,
    if_none_match: Option<&str>,
) -> ResultResp {
    let body = serde_json::to_vec(collection).map_err(|_| ServerError::InternalError)?;
    let etag = etag_for(&body);

    if if_none_match.is_some_and(|v| etag_matches(v, &etag)) {
        return ResponseBuilder::new()
            .status(304)
            .header("ETag", etag)
            .body(Body::empty())
            .map_err(|_| ServerError::InternalError);
    }

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .header("ETag", etag)
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
