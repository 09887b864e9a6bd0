//! Log API route configuration.

use axum::{Router, routing::get};
use kestrel_persistence::core::LogsRepository;

use crate::handlers;
use crate::state::AppState;

/// Path of the listing resource.
pub const LOGS_PATH: &str = "/v3.0/logs";

/// Creates all Log API routes.
///
/// # Routes
///
/// - `GET /v3.0/logs` - List logs
/// - `GET /healthcheck` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
pub fn create_routes<R>(state: AppState<R>) -> Router
where
    R: LogsRepository + Send + Sync + 'static,
{
    Router::new()
        .route(LOGS_PATH, get(handlers::list_logs_handler::<R>))
        .route("/healthcheck", get(handlers::health_handler::<R>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<R>))
        .with_state(state)
}
