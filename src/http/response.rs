//! Response construction.
//!
//! # Responsibilities
//! - Turn an assembled page into an HTML response
//! - Turn a stale link into a redirect with no body
//!
//! # Design Decisions
//! - Redirects use 302 Found; old links may be re-pointed later

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};

/// A 302 redirect to `location`.
pub fn redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!(location = %location, "Redirect location is not a valid header value");
            (StatusCode::BAD_REQUEST, "Malformed link").into_response()
        }
    }
}

/// An assembled page.
pub fn page(html: String) -> Response {
    Html(html).into_response()
}
