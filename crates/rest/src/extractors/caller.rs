//! Caller identity extractor.
//!
//! Builds a [`TenantContext`] from the `X-Tenant-Id` and `X-Roles` headers.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use kestrel_persistence::tenant::{TenantContext, TenantId};

use crate::error::RestError;
use crate::middleware::tenant::{X_ROLES, X_TENANT_ID};

/// Axum extractor for the calling tenant and its roles.
///
/// A missing or empty `X-Tenant-Id` is rejected with 400. A missing
/// `X-Roles` yields a caller with no roles, which authorization rejects.
///
/// # Example
///
/// ```rust,ignore
/// use kestrel_rest::extractors::Caller;
///
/// async fn handler(caller: Caller) {
///     println!("Tenant ID: {}", caller.tenant_id());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Caller {
    context: TenantContext,
}

impl Caller {
    /// Returns a reference to the tenant context.
    pub fn context(&self) -> &TenantContext {
        &self.context
    }

    /// Returns the tenant ID as a string.
    pub fn tenant_id(&self) -> &str {
        self.context.tenant_id().as_str()
    }

    /// Consumes the extractor and returns the tenant context.
    pub fn into_context(self) -> TenantContext {
        self.context
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, RestError> {
    headers
        .get(name)
        .map(|v| {
            v.to_str().map_err(|_| RestError::BadRequest {
                message: format!("Header {} is not valid text", name),
            })
        })
        .transpose()
}

/// Builds the caller context from request headers.
pub fn caller_from_headers(headers: &HeaderMap) -> Result<TenantContext, RestError> {
    let tenant_id = header_str(headers, X_TENANT_ID.as_str())?
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RestError::BadRequest {
            message: "Missing required header X-Tenant-Id".to_string(),
        })?;

    let roles = header_str(headers, X_ROLES.as_str())?.unwrap_or_default();

    Ok(TenantContext::from_roles_header(
        TenantId::new(tenant_id),
        roles,
    ))
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = caller_from_headers(&parts.headers)?;
        Ok(Caller { context })
    }
}
