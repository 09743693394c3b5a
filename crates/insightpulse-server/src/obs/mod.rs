//! HTTP observability middleware.
//!
//! - `track_requests`: request timer tagged by method/uri/status/outcome/exception
//! - `track_availability`: per-route availability gauge (0 on 5xx, else 1)
//!
//! Both record into the shared registry rendered by the metrics endpoint.

pub mod availability;
pub mod requests;

use axum::{
    extract::MatchedPath,
    http::{Method, Request},
};

pub use availability::track_availability;
pub use requests::track_requests;

/// `uri` tag for requests that matched no route.
pub const UNMATCHED_URI: &str = "NOT_FOUND";

/// `method` tag for anything outside the standard HTTP methods.
pub const OTHER_METHOD: &str = "OTHER";

/// Standard methods keep their name; extension methods collapse to `OTHER`
/// so arbitrary request lines cannot mint new series.
pub(crate) fn method_tag(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::HEAD => "HEAD",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::CONNECT => "CONNECT",
        Method::OPTIONS => "OPTIONS",
        Method::TRACE => "TRACE",
        Method::PATCH => "PATCH",
        _ => OTHER_METHOD,
    }
}

/// Route pattern (e.g. `/jobs/process-payment`) used as the `uri` tag.
pub(crate) fn route_of<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_URI.to_string())
}
