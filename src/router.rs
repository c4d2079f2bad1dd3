use crate::app::AppState;
use crate::db::listings::{count_listings, count_studio_listings};
use crate::errors::{ResultResp, ServerError};
use crate::geo::{listing_pass, poi_pass};
use crate::responses::{geojson_response, html_response, json_error_response, text_response};
use crate::templates::pages::{dashboard_page, home_page, map_page, DashboardVm, MapVm};
use astra::Request;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => html_response(home_page()),
        ("GET", "/health") => text_response("ok"),
        ("GET", "/dashboard") => dashboard(state),
        ("GET", "/dashboard/map") => html_response(map_page(&MapVm {
            mapbox_token: state.mapbox_token.clone(),
            bbox: state.bbox,
        })),
        ("GET", "/api/pois") => pois(&req, state),
        ("GET", "/api/studios") => studios(&req, state),
        _ => Err(ServerError::NotFound),
    }
}

fn if_none_match(req: &Request) -> Option<&str> {
    req.headers()
        .get("If-None-Match")
        .and_then(|v| v.to_str().ok())
}

fn dashboard(state: &AppState) -> ResultResp {
    let vm = DashboardVm {
        listing_source: state.listing_source_label.clone(),
        total_listings: count_listings(&state.db)?,
        studio_listings: count_studio_listings(&state.db)?,
    };
    html_response(dashboard_page(&vm))
}

fn pois(req: &Request, state: &AppState) -> ResultResp {
    match poi_pass(state.poi_source.as_ref(), &state.bbox) {
        Ok(layer) => geojson_response(&layer.to_geojson(), if_none_match(req)),
        Err(e) => {
            tracing::error!(error = %e, "POI pass failed");
            Ok(json_error_response("Failed to fetch POIs", &e))
        }
    }
}

fn studios(req: &Request, state: &AppState) -> ResultResp {
    match listing_pass(state.listings.as_ref()) {
        Ok(layer) => geojson_response(&layer.to_geojson(), if_none_match(req)),
        Err(e) => {
            tracing::error!(error = %e, "listing pass failed");
            Ok(json_error_response("Failed to fetch studio apartments", &e))
        }
    }
}
