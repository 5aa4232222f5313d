use axum::{http::StatusCode, response::Json};
use serde::Serialize;

use crate::errors::AppError;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
}

/// Health check handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

/// Preflight requests are answered by the CORS layer; this only guarantees a
/// 200 for OPTIONS when no CORS layer is installed.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for any method other than POST and OPTIONS on API routes.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
