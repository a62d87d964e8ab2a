//! Health check endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service name.
    pub service: &'static str,
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check handler. Reports liveness only; it does not touch the
/// database, so a healthy response does not imply storage is reachable.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "banklink",
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_service_identity() {
        let Json(body) = health_check().await;
        assert_eq!(body.service, "banklink");
        assert_eq!(body.status, "healthy");
        assert!(!body.version.is_empty());
    }
}
