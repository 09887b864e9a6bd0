//! Tenant identity and access policy.
//!
//! Every listing request is scoped to exactly one tenant. The caller's identity
//! arrives as a [`TenantContext`]; a [`RolePolicy`] decides whether the caller
//! may list logs and which tenant the request is scoped to.
//!
//! # Core Types
//!
//! - [`TenantId`] - Opaque tenant identifier
//! - [`TenantContext`] - Caller tenant plus the roles it presented
//! - [`RolePolicy`] - Authorized and delegate role sets
//!
//! # Examples
//!
//! ```
//! use kestrel_persistence::tenant::{RolePolicy, TenantContext, TenantId};
//!
//! let policy = RolePolicy::builder()
//!     .authorized_roles(["user"])
//!     .delegate_roles(["admin"])
//!     .build();
//!
//! let caller = TenantContext::from_roles_header(TenantId::new("acme"), "user");
//! policy.authorize(&caller).unwrap();
//!
//! // Non-delegates always query their own tenant.
//! let tenant = policy.resolve_tenant(&caller, Some("other")).unwrap();
//! assert_eq!(tenant.as_str(), "acme");
//! ```

mod context;
mod id;
mod roles;

pub use context::TenantContext;
pub use id::TenantId;
pub use roles::{RolePolicy, RolePolicyBuilder};
