//! Shared fixtures for router-level tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use insightpulse_server::app_state::AppState;
use insightpulse_server::chance::Chance;
use insightpulse_server::config::{AppConfig, DelayRange};
use insightpulse_server::router::build_router;

/// Chance whose outcomes are switched by the test.
#[derive(Default)]
pub struct Switch {
    pub fail: AtomicBool,
    pub heads: AtomicBool,
}

impl Switch {
    pub fn set_fail(&self, v: bool) {
        self.fail.store(v, Ordering::SeqCst);
    }

    pub fn set_heads(&self, v: bool) {
        self.heads.store(v, Ordering::SeqCst);
    }
}

impl Chance for Switch {
    fn hits(&self, _p: f64) -> bool {
        self.fail.load(Ordering::SeqCst)
    }

    fn flip(&self) -> bool {
        self.heads.load(Ordering::SeqCst)
    }

    fn pick_ms(&self, min: u64, _max: u64) -> u64 {
        min
    }
}

/// Config with no simulated delays.
pub fn fast_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.simulation.dummy_delay_ms = DelayRange::new(0, 0);
    cfg.simulation.report_delay_ms = DelayRange::new(0, 0);
    cfg.scheduler.enabled = false;
    cfg
}

pub fn scripted_app() -> (Router, AppState, Arc<Switch>) {
    let switch = Arc::new(Switch::default());
    let state = AppState::with_chance(fast_config(), switch.clone()).unwrap();
    (build_router(state.clone()), state, switch)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
