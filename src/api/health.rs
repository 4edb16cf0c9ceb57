//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::response::ApiResponse,
    AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessStatus {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

/// Liveness probe for the book API
#[utoipa::path(
    get,
    path = "/books/health",
    tag = "health",
    responses(
        (status = 200, description = "Envelope whose data is the string \"OK\"", body = String)
    )
)]
pub async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("Service is running", "OK"))
}

/// Readiness check endpoint (checks database connectivity)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessStatus),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ReadinessStatus>>> {
    state
        .services
        .is_ready()
        .await
        .map_err(|e| AppError::Unavailable(format!("Database unreachable: {}", e)))?;

    Ok(Json(ApiResponse::success(
        "Service is ready",
        ReadinessStatus {
            status: "ready".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )))
}
