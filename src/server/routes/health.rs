//! Health Routes
//!
//! - GET /health - Liveness and uptime

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::server::dto::HealthResponse;
use crate::server::state::AppState;

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
