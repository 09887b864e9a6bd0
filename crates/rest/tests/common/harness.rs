//! Log API test harness.
//!
//! Runs the real router and the real Elasticsearch repository against a
//! search client that records each request and answers from a canned
//! response, so tests can assert on both the HTTP surface and the exact
//! search body sent to the backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use kestrel_persistence::backends::elasticsearch::ElasticsearchLogsRepository;
use kestrel_persistence::core::{SearchClient, SearchRequest};
use kestrel_persistence::error::BackendError;
use serde_json::{Value, json};

use kestrel_rest::{AppState, ServerConfig};

/// Header carrying the caller's tenant.
pub const X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");

/// Header carrying the caller's roles.
pub const X_ROLES: HeaderName = HeaderName::from_static("x-roles");

/// How the recording client answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Return this raw search response.
    Response(Value),
    /// Fail as an unreachable cluster.
    Unavailable,
    /// Fail with a rejected query.
    Rejected,
}

/// A search client that records requests.
#[derive(Debug)]
pub struct RecordingClient {
    requests: Mutex<Vec<SearchRequest>>,
    reply: Mutex<Reply>,
}

impl RecordingClient {
    /// Creates a client answering with no hits.
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: Mutex::new(Reply::Response(hits(Vec::new()))),
        }
    }

    /// Changes how subsequent searches are answered.
    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    /// Returns every request seen so far.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the single request seen so far.
    pub fn only_request(&self) -> SearchRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "Expected exactly one search request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl SearchClient for RecordingClient {
    fn backend_name(&self) -> &'static str {
        "recording"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Value, BackendError> {
        self.requests.lock().unwrap().push(request.clone());

        match self.reply.lock().unwrap().clone() {
            Reply::Response(value) => Ok(value),
            Reply::Unavailable => Err(BackendError::Unavailable {
                backend_name: "recording".to_string(),
                message: "connection refused".to_string(),
            }),
            Reply::Rejected => Err(BackendError::QueryError {
                message: "status 400: parsing_exception".to_string(),
            }),
        }
    }

    async fn ping(&self) -> Result<(), BackendError> {
        match *self.reply.lock().unwrap() {
            Reply::Unavailable => Err(BackendError::Unavailable {
                backend_name: "recording".to_string(),
                message: "connection refused".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Wraps `_source` documents in a search response.
pub fn hits(sources: Vec<Value>) -> Value {
    let hits: Vec<Value> = sources
        .into_iter()
        .map(|source| json!({ "_index": "tenantbadger-2024.01.01", "_source": source }))
        .collect();
    let total = hits.len();
    json!({ "hits": { "total": { "value": total }, "hits": hits } })
}

/// Test harness for Log API testing.
pub struct LogsTestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// The client behind the repository.
    pub client: Arc<RecordingClient>,
}

impl LogsTestHarness {
    /// Creates a harness with the test configuration.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::for_testing())
    }

    /// Creates a harness with a custom configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        let client = Arc::new(RecordingClient::new());
        let repository =
            ElasticsearchLogsRepository::new(Arc::clone(&client), &config.search_settings())
                .expect("Failed to create repository");

        let state = AppState::new(Some(Arc::new(repository)), config);
        let app = kestrel_rest::routing::create_routes(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, client }
    }

    /// Starts a listing request as tenant `tenantbadger` holding `user`.
    pub fn list(&self, query: &str) -> TestRequest {
        self.list_as("tenantbadger", "user", query)
    }

    /// Starts a listing request with explicit identity headers.
    pub fn list_as(&self, tenant: &'static str, roles: &'static str, query: &str) -> TestRequest {
        let request = self
            .server
            .get(kestrel_rest::routing::LOGS_PATH)
            .add_header(X_TENANT_ID, HeaderValue::from_static(tenant))
            .add_header(X_ROLES, HeaderValue::from_static(roles));

        if query.is_empty() {
            request
        } else {
            request.add_raw_query_param(query)
        }
    }
}
