//! Caller identification middleware.
//!
//! Defines the identity headers and wraps each request in a span carrying the
//! caller's tenant so every log line emitted while serving it is attributable.

use axum::{extract::Request, http::header::HeaderName, middleware::Next, response::Response};
use tracing::{Instrument, debug_span};

/// Header name for tenant identification.
pub static X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");

/// Header name for the caller's comma-separated roles.
pub static X_ROLES: HeaderName = HeaderName::from_static("x-roles");

/// Extracts the tenant ID from a request, if present and valid text.
pub fn extract_tenant_id(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(&X_TENANT_ID)
        .and_then(|v| v.to_str().ok())
}

/// Middleware function for tenant-scoped tracing.
///
/// This can be used with `axum::middleware::from_fn`.
pub async fn tenant_middleware(request: Request, next: Next) -> Response {
    let tenant_id = extract_tenant_id(&request).unwrap_or("-").to_string();
    let span = debug_span!("request", tenant_id = %tenant_id);

    next.run(request).instrument(span).await
}
