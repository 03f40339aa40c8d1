//! Health routes
//!
//! Health check endpoints for monitoring and probes.
//!
//! - GET /health/live - liveness probe (process is alive)
//! - GET /health/ready - readiness probe (ready to serve traffic)
//! - GET /health - full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the store is hydrated and serving reads.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    // A snapshot read exercises the store's state lock; an empty result is
    // fine (no election configured yet).
    let _ = state.store.current_config();
    StatusCode::OK
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let election_loaded = state.store.current_config().is_some();

    Json(HealthResponse {
        status: "healthy".to_string(),
        storage: "ok".to_string(),
        election_loaded,
        ws_connections: state.ws_connection_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
