use axum::{extract::State, http::StatusCode};

use crate::app_state::AppState;
use crate::handlers::HandlerError;

pub async fn register_user(State(app): State<AppState>) -> Result<&'static str, HandlerError> {
    app.jobs().register_user().await.map_err(HandlerError::internal)?;
    Ok("User registered.")
}

pub async fn generate_report(State(app): State<AppState>) -> Result<&'static str, HandlerError> {
    app.jobs().generate_report().await.map_err(HandlerError::internal)?;
    Ok("Report generated.")
}

pub async fn process_payment(State(app): State<AppState>) -> Result<&'static str, HandlerError> {
    app.jobs()
        .process_payment()
        .await
        .map_err(|e| HandlerError::new(StatusCode::INTERNAL_SERVER_ERROR, "Payment failed", e))?;
    Ok("Payment processed.")
}

pub async fn inventory_sync(State(app): State<AppState>) -> Result<String, HandlerError> {
    let status = app.jobs().sync_inventory().await.map_err(HandlerError::internal)?;
    Ok(format!("Inventory Sync Status: {status}"))
}
