//! Health check handler.

use axum::response::Json;
use serde::Serialize;
use tracing::trace;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    status: String,
    version: String,
    commit: String,
    timestamp: String,
}

/// `GET /api/health`
pub(super) async fn health() -> Json<HealthResponse> {
    trace!("health check requested");
    Json(HealthResponse {
        status: "healthy".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        commit: env!("GIT_COMMIT_SHORT").to_owned(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
