//! # kestrel-rest - Log API HTTP Layer
//!
//! This crate exposes the listing side of a multi-tenant Log API over HTTP.
//! It parses and validates query parameters, authorizes the caller from the
//! identity headers set by an upstream authentication proxy, and delegates
//! to a [`LogsRepository`](kestrel_persistence::core::LogsRepository).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kestrel_rest::{create_app_with_config, ServerConfig};
//! use kestrel_persistence::backends::elasticsearch::ElasticsearchLogsRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!
//!     let repository = ElasticsearchLogsRepository::connect(
//!         config.elasticsearch_config(),
//!         &config.search_settings(),
//!     )?;
//!
//!     let app = create_app_with_config(Some(repository), config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:5607").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | HTTP Method | URL Pattern |
//! |----------|-------------|-------------|
//! | list logs | GET | `/v3.0/logs` |
//! | health | GET | `/healthcheck` |
//! | liveness | GET | `/_liveness` |
//! | readiness | GET | `/_readiness` |
//!
//! ## Query Parameters
//!
//! | Parameter | Example | Description |
//! |-----------|---------|-------------|
//! | `tenant_id` | `abc123` | Delegated tenant (delegate roles only) |
//! | `dimensions` | `level:error\|warn,host` | Dimension filters |
//! | `start_time` | `2024-01-01T00:00:00Z` | Inclusive lower bound |
//! | `end_time` | `2024-01-02T00:00:00Z` | Inclusive upper bound |
//! | `offset` | `10` | Records to skip |
//! | `limit` | `50` | Page size (default 10) |
//! | `sort_by` | `timestamp desc` | Sort order |
//!
//! ## HTTP Headers
//!
//! - `X-Tenant-Id` - The caller's own tenant (required)
//! - `X-Roles` - Comma-separated roles granted to the caller
//!
//! ## Error Handling
//!
//! Errors are returned as `{"title": ..., "description": ...}`:
//!
//! | HTTP Status | Cause |
//! |-------------|-------|
//! | 400 | Missing tenant header |
//! | 401 | No authorized role |
//! | 422 | Invalid query parameter |
//! | 500 | Backend failure or no repository configured |
//! | 503 | Backend unavailable |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and response bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (repository, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Axum middleware
//! - [`extractors`] - Caller and query-parameter extraction
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::{LogsDriver, ServerConfig};
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use kestrel_persistence::core::LogsRepository;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<R>(repository: R) -> Router
where
    R: LogsRepository + Send + Sync + 'static,
{
    create_app_with_config(Some(repository), ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// With `repository` set to `None` the server still starts; listing
/// requests then fail with `500` and readiness reports `503`.
///
/// # Example
///
/// ```rust,ignore
/// use kestrel_persistence::Unconfigured;
/// use kestrel_rest::{create_app_with_config, ServerConfig};
///
/// let app = create_app_with_config::<Unconfigured>(None, ServerConfig::default());
/// ```
pub fn create_app_with_config<R>(repository: Option<R>, config: ServerConfig) -> Router
where
    R: LogsRepository + Send + Sync + 'static,
{
    match &repository {
        Some(repository) => info!(
            backend = repository.backend_name(),
            "Creating Log API server"
        ),
        None => warn!("Creating Log API server without a logs repository"),
    }

    let state = AppState::new(repository.map(Arc::new), config.clone());

    let router = routing::logs_routes::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ))
        .layer(axum::middleware::from_fn(middleware::tenant_middleware));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set. Call once at startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "kestrel={level},kestrel_rest={level},kestrel_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{
        ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD,
        ORIGIN,
    };
    use axum::http::{Method, StatusCode};
    use axum_test::TestServer;
    use kestrel_persistence::Unconfigured;
    use serde_json::Value;

    fn server(config: ServerConfig) -> TestServer {
        TestServer::new(create_app_with_config::<Unconfigured>(None, config))
            .expect("Failed to create test server")
    }

    fn cors_config() -> ServerConfig {
        ServerConfig {
            enable_cors: true,
            // Unparseable entries are skipped rather than rejected.
            cors_origins: "http://localhost:3000, http://example.com,\u{7f}bad".to_string(),
            cors_methods: "GET,OPTIONS".to_string(),
            cors_headers: "X-Tenant-Id,X-Roles".to_string(),
            ..ServerConfig::for_testing()
        }
    }

    #[tokio::test]
    async fn test_cors_allows_listed_origin() {
        let server = server(cors_config());

        let response = server
            .get("/healthcheck")
            .add_header(ORIGIN, "http://example.com")
            .await;

        response.assert_status_ok();
        response.assert_header(ACCESS_CONTROL_ALLOW_ORIGIN, "http://example.com");
    }

    #[tokio::test]
    async fn test_cors_omits_unlisted_origin() {
        let server = server(cors_config());

        let response = server
            .get("/healthcheck")
            .add_header(ORIGIN, "http://evil.example")
            .await;

        response.assert_status_ok();
        assert!(response.maybe_header(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_cors_preflight_lists_methods() {
        let server = server(cors_config());

        let response = server
            .method(Method::OPTIONS, routing::LOGS_PATH)
            .add_header(ORIGIN, "http://localhost:3000")
            .add_header(ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .await;

        response.assert_status_ok();
        response.assert_header(ACCESS_CONTROL_ALLOW_ORIGIN, "http://localhost:3000");
        let methods = response.header(ACCESS_CONTROL_ALLOW_METHODS);
        assert!(methods.to_str().unwrap().contains("GET"));
    }

    #[tokio::test]
    async fn test_cors_disabled_adds_no_headers() {
        let server = server(ServerConfig::for_testing());

        let response = server
            .get("/healthcheck")
            .add_header(ORIGIN, "http://example.com")
            .await;

        assert!(response.maybe_header(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_app_without_repository() {
        let server = server(ServerConfig::for_testing());

        let readiness = server.get("/_readiness").await;
        readiness.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = readiness.json();
        assert_eq!(body["title"], "Service Unavailable");
        assert_eq!(body["description"], "The logs repository is not configured");

        let listing = server
            .get(routing::LOGS_PATH)
            .add_header(middleware::X_TENANT_ID.clone(), "tenantbadger")
            .add_header(middleware::X_ROLES.clone(), "user")
            .await;
        listing.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = listing.json();
        assert_eq!(body["title"], "Internal Server Error");
        assert_eq!(body["description"], "The logs repository is not configured");
    }
}
