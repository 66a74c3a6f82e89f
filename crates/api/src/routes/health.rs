use axum::{routing::get, Json, Router};
use jobdiary_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `true` while the process is serving requests.
    pub ok: bool,
    /// Current server time.
    pub ts: Timestamp,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /health -- liveness probe, no authentication.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        ts: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mount health check routes at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
