//! Health check handler

use axum::{extract::State, Json};
use parkinson_core::constants::CORE_VERSION;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    core_version: &'static str,
    model_type: &'static str,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        core_version: CORE_VERSION,
        model_type: state.model.metadata().model_type.as_str(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
