use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Directions API error: {0}")]
    DirectionsApi(String),

    /// The directions provider found no path through the requested waypoints.
    /// Expected for some candidate loops (water, restricted areas); callers
    /// treat it as "no candidate" rather than an anomaly.
    #[error("No route found for the requested waypoints")]
    NoRoute,

    #[error("Elevation API error: {0}")]
    ElevationApi(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DirectionsApi(ref e) => {
                tracing::error!("Directions API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error")
            }
            AppError::NoRoute => (StatusCode::NOT_FOUND, "No route found"),
            AppError::ElevationApi(ref e) => {
                tracing::error!("Elevation API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Elevation service error")
            }
            AppError::Cache(ref e) => {
                tracing::warn!("Cache error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Cache error")
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
