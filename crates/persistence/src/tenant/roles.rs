//! Role-based access policy.
//!
//! This module defines [`RolePolicy`], which decides whether a caller may list
//! logs at all and which tenant a listing request is scoped to.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::context::TenantContext;
use super::id::TenantId;
use crate::error::TenantError;

/// Role policy applied to every listing request.
///
/// A caller must hold at least one authorized role (compared
/// case-insensitively). Callers that also hold a delegate role may scope a
/// request to another tenant with an explicit `tenant_id` parameter.
///
/// # Examples
///
/// ```
/// use kestrel_persistence::tenant::{RolePolicy, TenantContext, TenantId};
///
/// let policy = RolePolicy::builder()
///     .authorized_roles(["user", "monasca-read-only-user"])
///     .delegate_roles(["admin"])
///     .build();
///
/// let caller = TenantContext::new(TenantId::new("ops"), ["admin", "user"]);
/// assert!(policy.authorize(&caller).is_ok());
///
/// let scoped = policy.resolve_tenant(&caller, Some("customer-a")).unwrap();
/// assert_eq!(scoped.as_str(), "customer-a");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolePolicy {
    /// Lowercased roles allowed to list logs.
    authorized_roles: HashSet<String>,
    /// Roles allowed to query on behalf of another tenant.
    delegate_roles: HashSet<String>,
}

impl RolePolicy {
    /// Creates a new policy builder.
    pub fn builder() -> RolePolicyBuilder {
        RolePolicyBuilder::default()
    }

    /// Checks that the caller holds at least one authorized role.
    pub fn authorize(&self, caller: &TenantContext) -> Result<(), TenantError> {
        if !caller.has_roles() {
            return Err(TenantError::NoRoles);
        }

        let authorized = caller
            .roles()
            .iter()
            .any(|role| self.authorized_roles.contains(&role.to_lowercase()));

        if authorized {
            Ok(())
        } else {
            Err(TenantError::MissingRole)
        }
    }

    /// Returns `true` if the caller holds any delegate role.
    pub fn is_delegate(&self, caller: &TenantContext) -> bool {
        caller
            .roles()
            .iter()
            .any(|role| self.delegate_roles.contains(role))
    }

    /// Resolves the tenant a request is scoped to.
    ///
    /// Delegates get `requested_tenant` when one is supplied; everyone else,
    /// and delegates without an explicit request, get their own tenant.
    pub fn resolve_tenant(
        &self,
        caller: &TenantContext,
        requested_tenant: Option<&str>,
    ) -> Result<TenantId, TenantError> {
        let tenant = match requested_tenant {
            Some(requested) if self.is_delegate(caller) => TenantId::new(requested),
            _ => caller.tenant_id().clone(),
        };

        if tenant.is_empty() {
            return Err(TenantError::EmptyTenant);
        }
        Ok(tenant)
    }

    /// Returns the authorized roles (lowercased).
    pub fn authorized_roles(&self) -> &HashSet<String> {
        &self.authorized_roles
    }

    /// Returns the delegate roles.
    pub fn delegate_roles(&self) -> &HashSet<String> {
        &self.delegate_roles
    }
}

/// Builder for [`RolePolicy`].
#[derive(Debug, Default)]
pub struct RolePolicyBuilder {
    authorized_roles: HashSet<String>,
    delegate_roles: HashSet<String>,
}

impl RolePolicyBuilder {
    /// Adds roles that may list logs.
    pub fn authorized_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        self.authorized_roles
            .extend(roles.into_iter().map(|r| r.as_ref().to_lowercase()));
        self
    }

    /// Adds roles that may query on behalf of other tenants.
    pub fn delegate_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        self.delegate_roles
            .extend(roles.into_iter().map(|r| r.as_ref().to_string()));
        self
    }

    /// Builds the policy.
    pub fn build(self) -> RolePolicy {
        RolePolicy {
            authorized_roles: self.authorized_roles,
            delegate_roles: self.delegate_roles,
        }
    }
}
