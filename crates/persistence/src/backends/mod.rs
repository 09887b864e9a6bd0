//! Search backend implementations.
//!
//! # Available Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | Elasticsearch | `elasticsearch` | Tenant-scoped log indices |
//!
//! The request builder, result transformer and repository are always
//! compiled; only the HTTP client needs the `elasticsearch` feature.

pub mod elasticsearch;
