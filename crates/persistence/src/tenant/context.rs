//! Caller tenant context.
//!
//! This module defines [`TenantContext`], the authenticated identity of the
//! caller: the project it belongs to and the roles it holds. The context is
//! built from request headers by the HTTP layer and is the input to
//! [`RolePolicy`](super::RolePolicy) checks.

use super::id::TenantId;

/// The identity of the caller making a request.
///
/// # Examples
///
/// ```
/// use kestrel_persistence::tenant::{TenantContext, TenantId};
///
/// let ctx = TenantContext::new(TenantId::new("tenantbadger"), ["admin", "user"]);
/// assert_eq!(ctx.tenant_id().as_str(), "tenantbadger");
/// assert!(ctx.has_roles());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    /// The caller's own tenant.
    tenant_id: TenantId,
    /// Roles presented by the caller, in header order.
    roles: Vec<String>,
}

impl TenantContext {
    /// Creates a new context for the given tenant and roles.
    pub fn new<I, R>(tenant_id: TenantId, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            tenant_id,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a context from a comma-separated roles header value.
    ///
    /// Surrounding whitespace is trimmed and empty entries are skipped.
    pub fn from_roles_header(tenant_id: TenantId, roles: &str) -> Self {
        Self::new(
            tenant_id,
            roles
                .split(',')
                .map(str::trim)
                .filter(|role| !role.is_empty()),
        )
    }

    /// Returns the caller's tenant ID.
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the caller's roles.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns `true` if the caller presented at least one role.
    pub fn has_roles(&self) -> bool {
        !self.roles.is_empty()
    }
}
