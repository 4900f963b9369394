use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Ready once the database answers.
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match mbh_infrastructure::ping(&state.db).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            error!("Readiness check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
