//! [`LogsRepository`] implementation over a [`SearchClient`].

use std::fmt::Debug;

use async_trait::async_trait;

use crate::core::{LogsRepository, SearchClient};
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{ListLogsQuery, LogRecord};

#[cfg(feature = "elasticsearch")]
use super::client::ElasticsearchClient;
#[cfg(feature = "elasticsearch")]
use super::config::ElasticsearchConfig;
use super::config::SearchSettings;
use super::result_transformer::ResultTransformer;
use super::search::SearchBuilder;

/// Lists logs stored in Elasticsearch.
///
/// Generic over the client so the query path can run against a canned or
/// recording client in tests.
pub struct ElasticsearchLogsRepository<C> {
    client: C,
    builder: SearchBuilder,
    transformer: ResultTransformer,
}

impl<C: SearchClient> Debug for ElasticsearchLogsRepository<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchLogsRepository")
            .field("backend", &self.client.backend_name())
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

impl<C: SearchClient> ElasticsearchLogsRepository<C> {
    /// Creates a repository over `client` using the given index layout.
    pub fn new(client: C, settings: &SearchSettings) -> StorageResult<Self> {
        let builder = SearchBuilder::new(settings)?;
        let transformer = ResultTransformer::new(settings);

        Ok(Self {
            client,
            builder,
            transformer,
        })
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the request builder.
    pub fn builder(&self) -> &SearchBuilder {
        &self.builder
    }
}

#[cfg(feature = "elasticsearch")]
impl ElasticsearchLogsRepository<ElasticsearchClient> {
    /// Builds the HTTP client from `config` and a repository over it.
    ///
    /// Client construction failures surface as [`StorageError::Backend`].
    pub fn connect(config: ElasticsearchConfig, settings: &SearchSettings) -> StorageResult<Self> {
        let client = ElasticsearchClient::new(config).map_err(StorageError::Backend)?;
        Self::new(client, settings)
    }
}

fn wrap_client_error(backend_name: &str, err: BackendError) -> StorageError {
    match err {
        // Keep unavailability distinguishable so callers can answer 503.
        BackendError::Unavailable { .. } => StorageError::Backend(err),
        other => StorageError::Backend(BackendError::Internal {
            backend_name: backend_name.to_string(),
            message: format!("search request failed: {}", other),
            source: Some(Box::new(other)),
        }),
    }
}

#[async_trait]
impl<C: SearchClient> LogsRepository for ElasticsearchLogsRepository<C> {
    fn backend_name(&self) -> &'static str {
        self.client.backend_name()
    }

    async fn list_logs(&self, query: &ListLogsQuery) -> StorageResult<Vec<LogRecord>> {
        let request = self.builder.build(query)?;

        tracing::debug!(
            tenant = %query.tenant_id,
            index = %request.index_name,
            filters = request.filter_clauses.len(),
            size = request.size,
            from = ?request.from,
            "Executing log search"
        );

        let response = self.client.search(&request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                index = %request.index_name,
                "Log search failed"
            );
            wrap_client_error(self.client.backend_name(), e)
        })?;

        let records = self.transformer.transform(&response).map_err(|e| {
            tracing::error!(error = %e, index = %request.index_name, "Unexpected search response");
            StorageError::Backend(BackendError::SerializationError {
                message: e.to_string(),
            })
        })?;

        tracing::debug!(hits = records.len(), "Log search completed");

        Ok(records)
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.client.ping().await.map_err(StorageError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use serde_json::{Value, json};

    use crate::core::SearchRequest;
    use crate::error::ConfigurationError;
    use crate::tenant::TenantId;
    use crate::types::{Dimension, TimeRange};

    #[derive(Default)]
    struct StubClient {
        response: Option<Value>,
        failure: Option<fn() -> BackendError>,
        requests: Mutex<Vec<SearchRequest>>,
    }

    impl StubClient {
        fn returning(response: Value) -> Self {
            Self {
                response: Some(response),
                ..Default::default()
            }
        }

        fn failing(failure: fn() -> BackendError) -> Self {
            Self {
                failure: Some(failure),
                ..Default::default()
            }
        }

        fn recorded(&self) -> Vec<SearchRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchClient for StubClient {
        fn backend_name(&self) -> &'static str {
            "stub"
        }

        async fn search(&self, request: &SearchRequest) -> Result<Value, BackendError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(failure) = self.failure {
                return Err(failure());
            }
            Ok(self.response.clone().unwrap_or(json!({ "hits": { "hits": [] } })))
        }

        async fn ping(&self) -> Result<(), BackendError> {
            match self.failure {
                Some(failure) => Err(failure()),
                None => Ok(()),
            }
        }
    }

    fn hit(message: &str) -> Value {
        json!({
            "_source": {
                "@timestamp": "2017-01-01T05:00:00Z",
                "message": message,
                "dimensions": { "hostname": "web-01" }
            }
        })
    }

    fn query() -> ListLogsQuery {
        ListLogsQuery::new(TenantId::new("abc123"))
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let settings = SearchSettings {
            index_pattern: "static".to_string(),
            ..Default::default()
        };
        let result = ElasticsearchLogsRepository::new(StubClient::default(), &settings);
        assert!(matches!(
            result,
            Err(StorageError::Configuration(
                ConfigurationError::InvalidIndexPattern { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_list_logs_flattens_hits() {
        let client = StubClient::returning(json!({
            "hits": { "hits": [hit("first"), hit("second")] }
        }));
        let repo = ElasticsearchLogsRepository::new(client, &SearchSettings::default()).unwrap();

        let records = repo.list_logs(&query()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].message, json!("second"));
    }

    #[tokio::test]
    async fn test_list_logs_sends_built_request() {
        let client = Arc::new(StubClient::default());
        let repo =
            ElasticsearchLogsRepository::new(client.clone(), &SearchSettings::default()).unwrap();

        let q = query()
            .with_dimensions(vec![Dimension::with_values("level", ["error"])])
            .with_time_range(TimeRange::new(Some(1), Some(2)).unwrap())
            .with_limit(5);
        repo.list_logs(&q).await.unwrap();

        let requests = client.recorded();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].index_name, "abc123-*");
        assert_eq!(requests[0].size, 5);
        assert_eq!(requests[0].filter_clauses.len(), 2);
    }

    #[tokio::test]
    async fn test_client_failure_is_wrapped() {
        let client = StubClient::failing(|| BackendError::QueryError {
            message: "boom".to_string(),
        });
        let repo = ElasticsearchLogsRepository::new(client, &SearchSettings::default()).unwrap();

        let err = repo.list_logs(&query()).await.unwrap_err();
        match err {
            StorageError::Backend(BackendError::Internal {
                backend_name,
                source,
                ..
            }) => {
                assert_eq!(backend_name, "stub");
                assert!(source.unwrap().to_string().contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unavailable_passes_through() {
        let client = StubClient::failing(|| BackendError::Unavailable {
            backend_name: "stub".to_string(),
            message: "down".to_string(),
        });
        let repo = ElasticsearchLogsRepository::new(client, &SearchSettings::default()).unwrap();

        assert!(matches!(
            repo.list_logs(&query()).await,
            Err(StorageError::Backend(BackendError::Unavailable { .. }))
        ));
        assert!(repo.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_response_is_serialization_error() {
        let client = StubClient::returning(json!({
            "hits": { "hits": [{ "_source": { "message": "no timestamp" } }] }
        }));
        let repo = ElasticsearchLogsRepository::new(client, &SearchSettings::default()).unwrap();

        let err = repo.list_logs(&query()).await.unwrap_err();
        match err {
            StorageError::Backend(BackendError::SerializationError { message }) => {
                assert!(message.contains("@timestamp"), "message: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_response_without_hits_is_serialization_error() {
        let client = StubClient::returning(json!({ "took": 3 }));
        let repo = ElasticsearchLogsRepository::new(client, &SearchSettings::default()).unwrap();

        assert!(matches!(
            repo.list_logs(&query()).await,
            Err(StorageError::Backend(BackendError::SerializationError { .. }))
        ));
    }

    #[tokio::test]
    async fn test_empty_tenant_never_reaches_client() {
        let client = Arc::new(StubClient::default());
        let repo =
            ElasticsearchLogsRepository::new(client.clone(), &SearchSettings::default()).unwrap();

        let result = repo.list_logs(&ListLogsQuery::new(TenantId::new(""))).await;

        assert!(matches!(
            result,
            Err(StorageError::Configuration(ConfigurationError::EmptyTenant))
        ));
        assert!(client.recorded().is_empty());
    }
}
