//! HTTP middleware for the Log API.
//!
//! - [`tenant`] - Identity headers and tenant-scoped request spans

pub mod tenant;

pub use tenant::{X_ROLES, X_TENANT_ID, tenant_middleware};
