/// Health check API routes
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// GET /api/health
/// 503 when the database does not answer
pub async fn health(State(app_state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database_up = sqlx::query("SELECT 1")
        .execute(&app_state.pool)
        .await
        .map_err(|e| tracing::error!("Health check query failed: {}", e))
        .is_ok();

    let (status, body_status, database) = if database_up {
        (StatusCode::OK, "ok", "up")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
    };

    (
        status,
        Json(HealthResponse {
            status: body_status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
