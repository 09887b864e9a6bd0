//! Search backend client abstraction.
//!
//! This module defines the seam between the repository and the search engine:
//! - [`SearchRequest`] - A backend request built from a listing query
//! - [`SearchClient`] - Executes requests and returns the raw response

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::error::BackendError;

/// A search request ready to be sent to the backend.
///
/// Filter and sort clauses are kept as opaque JSON so the request can be
/// inspected before [`body`](Self::body) renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// The index (or index pattern) to search.
    pub index_name: String,
    /// Number of hits to return.
    pub size: u64,
    /// Number of hits to skip.
    pub from: Option<u64>,
    /// Clauses combined under a boolean filter.
    pub filter_clauses: Vec<Value>,
    /// Sort clauses, in priority order.
    pub sort_clauses: Option<Vec<Value>>,
}

impl SearchRequest {
    /// Renders the request body.
    ///
    /// `query` is omitted entirely when there are no filters, which the
    /// backend treats as match-all.
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("size".to_string(), json!(self.size));

        if let Some(from) = self.from {
            body.insert("from".to_string(), json!(from));
        }

        if !self.filter_clauses.is_empty() {
            body.insert(
                "query".to_string(),
                json!({ "bool": { "filter": self.filter_clauses } }),
            );
        }

        if let Some(ref sort) = self.sort_clauses {
            body.insert("sort".to_string(), json!(sort));
        }

        Value::Object(body)
    }
}

/// A client able to execute search requests.
///
/// Implementations translate library-specific failures into [`BackendError`]
/// so nothing backend-specific escapes the repository.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Returns a human-readable name for the backend.
    fn backend_name(&self) -> &'static str;

    /// Executes a search and returns the raw response body.
    async fn search(&self, request: &SearchRequest) -> Result<Value, BackendError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), BackendError>;
}

#[async_trait]
impl<T: SearchClient + ?Sized> SearchClient for Arc<T> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    async fn search(&self, request: &SearchRequest) -> Result<Value, BackendError> {
        (**self).search(request).await
    }

    async fn ping(&self) -> Result<(), BackendError> {
        (**self).ping().await
    }
}
