//! Health check controller.

use crate::{responses::ApiResponse, state::AppState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use memo_core::ErrorResponse;
use serde::Serialize;
use tracing::warn;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint. Ready once the store answers.
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    match state.memo_service.health_check().await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            let error = ErrorResponse::from_error(&e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(ApiResponse::<()>::error(error))).into_response()
        }
    }
}

/// Liveness check endpoint.
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
