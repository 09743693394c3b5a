//! HTTP handlers for the simulated job routes.
//!
//! Handlers call into the services and turn their results into the fixed
//! response strings clients see. Failures that should surface as an HTTP error
//! go through [`HandlerError`], which also tags the response with the error
//! kind for the request metrics middleware.

pub mod dummy;
pub mod jobs;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use insightpulse_core::InsightError;

/// Error kind attached to a response as an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureKind(pub &'static str);

/// Service error converted into a plain-text HTTP error.
#[derive(Debug)]
pub struct HandlerError {
    status: StatusCode,
    prefix: &'static str,
    source: InsightError,
}

impl HandlerError {
    pub fn new(status: StatusCode, prefix: &'static str, source: InsightError) -> Self {
        Self { status, prefix, source }
    }

    pub fn internal(source: InsightError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error", source)
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        tracing::warn!(
            status = self.status.as_u16(),
            exception = self.source.kind(),
            error = %self.source,
            "request failed"
        );
        let body = format!("{}: {}", self.prefix, self.source.message());
        let mut resp = (self.status, body).into_response();
        resp.extensions_mut().insert(FailureKind(self.source.kind()));
        resp
    }
}
