use axum::{extract::State, Json};
use common::types::Health;
use tracing::error;

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Process is alive", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(
    get, path = "/api/health", tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = crate::openapi::HealthResponse),
        (status = 503, description = "Database unreachable", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn db_health(State(state): State<AppState>) -> Result<Json<Health>, JsonApiError> {
    match state.db.ping().await {
        Ok(()) => Ok(Json(Health { status: "ok" })),
        Err(e) => {
            error!(event = "db_ping_failed", error = %e, "database health check failed");
            Err(JsonApiError::new(axum::http::StatusCode::SERVICE_UNAVAILABLE, "database unavailable"))
        }
    }
}
