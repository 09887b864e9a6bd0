//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and load
//! balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kestrel_persistence::core::LogsRepository;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Reports that the process is serving; it does not contact the backend.
///
/// # HTTP Request
///
/// `GET [base]/healthcheck`
pub async fn health_handler<R>(State(state): State<AppState<R>>) -> RestResult<Response>
where
    R: LogsRepository + Send + Sync,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for a liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for a readiness probe.
///
/// Pings the repository backend.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - The backend is reachable
/// - `503 Service Unavailable` - The backend is unreachable or not configured
pub async fn readiness_handler<R>(State(state): State<AppState<R>>) -> RestResult<Response>
where
    R: LogsRepository + Send + Sync,
{
    debug!("Processing readiness check request");

    let repository = state
        .repository()
        .ok_or_else(|| RestError::ServiceUnavailable {
            message: "The logs repository is not configured".to_string(),
        })?;

    if let Err(e) = repository.health_check().await {
        warn!(error = %e, backend = repository.backend_name(), "Readiness check failed");
        return Err(RestError::ServiceUnavailable {
            message: e.to_string(),
        });
    }

    let response = serde_json::json!({
        "status": "ready",
        "backend": repository.backend_name(),
        "checks": {
            "repository": "ok"
        }
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
