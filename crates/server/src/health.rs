use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub checked_at: String,
}

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

// The engine is pure and holds no connections, so readiness only attests
// that the process is serving.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready",
        service: "ballpark-server",
        checked_at: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use crate::health::health;

    #[tokio::test]
    async fn health_reports_ready() {
        let payload = health().await.0;

        assert_eq!(payload.status, "ready");
        assert_eq!(payload.service, "ballpark-server");
        assert!(!payload.checked_at.is_empty());
    }
}
