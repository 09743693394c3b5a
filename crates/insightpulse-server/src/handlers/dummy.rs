use axum::extract::State;

use crate::app_state::AppState;

/// `GET /execute-dummy-job`: failures are reported in the body with status 200.
pub async fn execute_dummy_job(State(app): State<AppState>) -> String {
    match app.dummy().run_job().await {
        Ok(()) => "Job executed successfully".to_string(),
        Err(e) => format!("Job execution failed: {}", e.message()),
    }
}
