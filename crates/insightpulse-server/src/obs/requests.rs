use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use insightpulse_core::instrument::{NO_EXCEPTION, OUTCOME_FAILURE, OUTCOME_SUCCESS};

use crate::app_state::AppState;
use crate::handlers::FailureKind;

use super::{method_tag, route_of};

pub const REQUEST_TIMER: &str = "http_server_requests_seconds";

/// Time every request and record it under its route, status and outcome.
pub async fn track_requests(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = method_tag(req.method());
    let uri = route_of(&req);

    let resp = next.run(req).await;

    let status = resp.status();
    let outcome = if status.is_success() { OUTCOME_SUCCESS } else { OUTCOME_FAILURE };
    let exception = resp
        .extensions()
        .get::<FailureKind>()
        .map(|k| k.0)
        .unwrap_or(NO_EXCEPTION);
    let status = status.as_u16().to_string();

    let tags = [
        ("method", method),
        ("uri", uri.as_str()),
        ("status", status.as_str()),
        ("outcome", outcome),
        ("exception", exception),
    ];
    match app.registry().timer(REQUEST_TIMER, "HTTP server request duration", &tags) {
        Ok(t) => t.record(started.elapsed()),
        Err(e) => tracing::warn!(error = %e, "request timer unavailable"),
    }

    tracing::debug!(%method, %uri, %status, outcome, "request completed");
    resp
}
