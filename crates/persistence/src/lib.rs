//! Kestrel Log API Persistence Layer
//!
//! This crate provides the read side of a multi-tenant log store: a typed
//! listing query, tenant and role handling, and a repository that turns the
//! query into a search-engine request and flattens the hits it returns.
//!
//! # Backend Features
//!
//! Enable backends with feature flags in `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! kestrel-persistence = { version = "0.1", features = ["elasticsearch"] }
//! ```
//!
//! Available backend features:
//! - `elasticsearch` (default) - HTTP client for an Elasticsearch cluster
//!
//! # Architecture
//!
//! - [`tenant`] - Tenant identity and role policy
//! - [`types`] - The listing query and log record model
//! - [`error`] - Error types for all operations
//! - [`core`] - Repository and search-client traits
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```
//! use kestrel_persistence::backends::elasticsearch::{SearchBuilder, SearchSettings};
//! use kestrel_persistence::tenant::TenantId;
//! use kestrel_persistence::types::{Dimension, ListLogsQuery};
//!
//! let builder = SearchBuilder::new(&SearchSettings::default()).unwrap();
//! let query = ListLogsQuery::new(TenantId::new("abc123"))
//!     .with_dimensions(vec![Dimension::with_values("level", ["error", "warn"])])
//!     .with_limit(50);
//!
//! let request = builder.build(&query).unwrap();
//! assert_eq!(request.index_name, "abc123-*");
//! assert_eq!(request.body()["size"], 50);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod tenant;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use tenant::{RolePolicy, TenantContext, TenantId};
pub use types::{ListLogsQuery, LogRecord};

// Re-export core traits
pub use core::{LogsRepository, SearchClient, SearchRequest, Unconfigured};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
