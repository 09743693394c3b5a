//! InsightPulse server
//!
//! Serves the simulated job routes and `/metrics`, and runs the scheduled
//! job in the background until Ctrl+C / SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use insightpulse_core::error::{InsightError, Result};
use insightpulse_server::{app_state, chance::ThreadChance, config, router, scheduler};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "insightpulse-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_or_default()?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sched_cfg = &state.cfg().scheduler;
    let sched_handle = if sched_cfg.enabled {
        let job =
            scheduler::ScheduledJob::new(&state.registry(), Arc::new(ThreadChance), sched_cfg)?;
        tracing::info!(interval_ms = sched_cfg.interval_ms, "scheduler starting");
        Some(scheduler::spawn(job, Duration::from_millis(sched_cfg.interval_ms), shutdown_rx))
    } else {
        None
    };

    let app = router::build_router(state);

    tracing::info!(%listen, "insightpulse-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| InsightError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| InsightError::Internal(format!("server failed: {e}")))?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = sched_handle {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "scheduler task ended abnormally");
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
