//! Axum router wiring.
//!
//! Job routes, ops routes, and the observability middleware stack.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, handlers, obs, ops};

pub fn build_router(state: AppState) -> Router {
    let metrics_path = state.cfg().server.metrics_path.clone();

    Router::new()
        .route("/execute-dummy-job", get(handlers::dummy::execute_dummy_job))
        .route("/jobs/register-user", get(handlers::jobs::register_user))
        .route("/jobs/generate-report", get(handlers::jobs::generate_report))
        .route("/jobs/process-payment", get(handlers::jobs::process_payment))
        .route("/jobs/inventory-sync", get(handlers::jobs::inventory_sync))
        .route("/healthz", get(ops::healthz))
        .route(&metrics_path, get(ops::metrics))
        .fallback(ops::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), obs::track_availability))
        .layer(middleware::from_fn_with_state(state.clone(), obs::track_requests))
        .with_state(state)
}
