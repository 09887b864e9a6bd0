//! Elasticsearch backend implementation.
//!
//! Logs are stored in tenant-scoped indices named by substituting the tenant
//! into a pattern (default `{tenant_id}-*`). Each document carries a timestamp,
//! a message, and a dimensions object; the field paths are configurable
//! through [`SearchSettings`].
//!
//! The query path is split into pure and I/O halves:
//!
//! - [`SearchBuilder`] - `ListLogsQuery` to Query DSL
//! - [`ResultTransformer`] - search hits to `LogRecord`s
//! - [`ElasticsearchLogsRepository`] - glues both around a `SearchClient`
//! - `ElasticsearchClient` - the HTTP client (feature `elasticsearch`)
//!
//! # Example
//!
//! ```ignore
//! use kestrel_persistence::backends::elasticsearch::{
//!     ElasticsearchConfig, ElasticsearchLogsRepository, SearchSettings,
//! };
//!
//! let repo = ElasticsearchLogsRepository::connect(
//!     ElasticsearchConfig::default(),
//!     &SearchSettings::default(),
//! )?;
//! let logs = repo.list_logs(&query).await?;
//! ```

#[cfg(feature = "elasticsearch")]
mod client;
mod config;
mod repository;
pub mod result_transformer;
pub mod search;

#[cfg(feature = "elasticsearch")]
pub use client::ElasticsearchClient;
pub use config::{ElasticsearchAuth, ElasticsearchConfig, SearchSettings, TENANT_PLACEHOLDER};
pub use repository::ElasticsearchLogsRepository;
pub use result_transformer::{ResultTransformer, TransformError};
pub use search::SearchBuilder;
