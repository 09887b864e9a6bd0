//! Log listing handler.
//!
//! Implements the listing interaction: `GET [base]/v3.0/logs`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kestrel_persistence::core::LogsRepository;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::{Caller, QueryParams, build_list_logs_query};
use crate::state::AppState;

/// Handler for listing logs.
///
/// Authorizes the caller, normalizes the query string and asks the
/// repository for matching logs.
///
/// # HTTP Request
///
/// `GET [base]/v3.0/logs?[parameters]`
///
/// # Headers
///
/// - `X-Tenant-Id` - Required caller tenant
/// - `X-Roles` - Comma-separated caller roles
///
/// # Query Parameters
///
/// `tenant_id`, `start_time`, `end_time`, `dimensions`, `limit`, `offset`, `sort_by`
///
/// # Response
///
/// Returns:
/// - `200 OK` with `{"elements": [...]}`
/// - `400 Bad Request` if the identity headers are unusable
/// - `401 Unauthorized` if the caller lacks an authorized role
/// - `422 Unprocessable Entity` if a parameter is invalid
/// - `500 Internal Server Error` if no repository is configured or the backend fails
/// - `503 Service Unavailable` if the backend is unreachable
pub async fn list_logs_handler<R>(
    State(state): State<AppState<R>>,
    caller: Caller,
    params: QueryParams,
) -> RestResult<Response>
where
    R: LogsRepository + Send + Sync,
{
    let options = state.list_logs_options();
    options.policy.authorize(caller.context())?;

    let query = build_list_logs_query(&params, caller.context(), options)?;

    debug!(
        caller = %caller.tenant_id(),
        tenant = %query.tenant_id,
        dimensions = query.dimensions.as_ref().map_or(0, Vec::len),
        limit = query.limit,
        offset = ?query.offset,
        "Processing list logs request"
    );

    let repository = state.repository().ok_or(RestError::NotConfigured)?;

    let elements = repository.list_logs(&query).await.map_err(|e| {
        tracing::error!(error = %e, tenant = %query.tenant_id, "Failed to list logs");
        RestError::from(e)
    })?;

    debug!(count = elements.len(), "Listed logs");

    let body = serde_json::json!({ "elements": elements });
    Ok((StatusCode::OK, Json(body)).into_response())
}
