use lambda_http::http::header::HeaderValue;
use lambda_http::{http::StatusCode, Body, Error, Response};

/// Attach the CORS headers every API response carries.
pub fn with_cors_headers(mut resp: Response<Body>) -> Response<Body> {
    let headers = resp.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static("*"),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,POST,PUT,DELETE,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type,Authorization"),
    );
    resp
}

/// JSON failure envelope for errors the router produces itself
/// (unknown route, wrong method).
pub fn error_response(status: StatusCode, message: &str) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({"success": false, "error": message})
                .to_string()
                .into(),
        )
        .map_err(Box::new)?)
}
