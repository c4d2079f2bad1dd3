use crate::errors::ServerError;
use crate::geo::PipelineError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Convert a ServerError into a proper HTML response page
pub fn html_error_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => render_error(404, "Not Found"),
        ServerError::DbError(msg) => render_error(500, &format!("Database Error: {msg}")),
        ServerError::InternalError => render_error(500, "Internal Server Error"),
    }
}

/// Failed pass on an API route. The body carries an `error` key so a
/// client can tell it from a (possibly empty) FeatureCollection.
pub fn json_error_response(context: &str, err: &PipelineError) -> Response {
    let status = match err {
        PipelineError::UpstreamUnavailable(_) => 502,
        PipelineError::StoreUnreadable(_) => 500,
    };
    let body = json!({ "error": context, "details": err.to_string() }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

/// Build a basic HTML error page
fn render_error(status: u16, message: &str) -> Response {
    let page = crate::templates::components::error_page(status, message).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
