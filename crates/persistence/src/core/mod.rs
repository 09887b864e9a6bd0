//! Core repository traits and abstractions.
//!
//! - [`LogsRepository`] - What the HTTP layer calls to list logs
//! - [`SearchClient`] - What a repository calls to reach the search engine
//! - [`SearchRequest`] - The request passed across that seam
//!
//! ```text
//! LogsRepository::list_logs
//!     ├── SearchBuilder::build      -> SearchRequest
//!     ├── SearchClient::search      -> raw response
//!     └── ResultTransformer::transform -> Vec<LogRecord>
//! ```
//!
//! # Example: A Canned Search Client
//!
//! ```
//! use async_trait::async_trait;
//! use kestrel_persistence::core::{SearchClient, SearchRequest};
//! use kestrel_persistence::error::BackendError;
//! use serde_json::{Value, json};
//!
//! struct EmptyClient;
//!
//! #[async_trait]
//! impl SearchClient for EmptyClient {
//!     fn backend_name(&self) -> &'static str {
//!         "empty"
//!     }
//!
//!     async fn search(&self, _request: &SearchRequest) -> Result<Value, BackendError> {
//!         Ok(json!({ "hits": { "hits": [] } }))
//!     }
//!
//!     async fn ping(&self) -> Result<(), BackendError> {
//!         Ok(())
//!     }
//! }
//! ```

pub mod repository;
pub mod search;

pub use repository::{LogsRepository, Unconfigured};
pub use search::{SearchClient, SearchRequest};
