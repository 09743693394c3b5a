use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

use super::{method_tag, route_of};

pub const AVAILABILITY_GAUGE: &str = "api_availability";

/// Flip the per-route availability gauge after each response.
/// Series are registered lazily on the first response for a tag-set.
pub async fn track_availability(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let method = method_tag(req.method());
    let uri = route_of(&req);

    let resp = next.run(req).await;

    let status = resp.status();
    let available = if status.is_server_error() { 0 } else { 1 };
    let status = status.as_u16().to_string();

    let tags = [
        ("method", method),
        ("uri", uri.as_str()),
        ("status", status.as_str()),
    ];
    match app.registry().gauge(
        AVAILABILITY_GAUGE,
        "API availability by method and URI pattern",
        &tags,
    ) {
        Ok(g) => g.set(available),
        Err(e) => tracing::warn!(error = %e, "availability gauge unavailable"),
    }

    resp
}
