//! Server configuration for the Log API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REST_SERVER_PORT` | 5607 | Server port |
//! | `REST_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `REST_LOG_LEVEL` | info | Log level |
//! | `REST_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `REST_ENABLE_CORS` | true | Enable CORS |
//! | `REST_CORS_ORIGINS` | * | Allowed origins |
//! | `REST_CORS_METHODS` | GET,OPTIONS | Allowed methods |
//! | `REST_CORS_HEADERS` | Content-Type,Accept,X-Tenant-Id,X-Roles | Allowed headers |
//! | `REST_LOGS_DRIVER` | elasticsearch | Logs repository driver (`elasticsearch` or `none`) |
//! | `REST_DEFAULT_ROLES` | user,domainuser,domainadmin,monasca-user | Roles allowed to list logs |
//! | `REST_READ_ONLY_ROLES` | monasca-read-only-user | Additional read-only roles |
//! | `REST_DELEGATE_ROLES` | admin | Roles that may query other tenants |
//! | `REST_REGION` | (unset) | Fixed region filter |
//! | `REST_STRICT_QUERY` | true | Reject unknown query parameters |
//! | `REST_DEFAULT_SORT_DIRECTION` | desc | Direction for `sort_by=field` (`asc`, `desc`, `none`) |
//! | `REST_MAX_LIMIT` | (unset) | Upper bound applied to `limit` |
//! | `ES_NODES` | http://localhost:9200 | Comma-separated node URLs |
//! | `ES_USERNAME` / `ES_PASSWORD` | (unset) | Basic auth |
//! | `ES_REQUEST_TIMEOUT_MS` | 30000 | Client request timeout |
//! | `ES_DISABLE_CERT_VALIDATION` | false | Skip TLS verification |
//! | `ES_CA_CERTS` | (unset) | PEM bundle for TLS verification |
//! | `ES_CLIENT_CERT` / `ES_CLIENT_KEY` | (unset) | PEM client certificate and key for mutual TLS |
//! | `ES_INDEX_PATTERN` | {tenant_id}-* | Index pattern |
//! | `ES_TIMESTAMP_FIELD` | @timestamp | Timestamp field path |
//! | `ES_MESSAGE_FIELD` | message | Message field path |
//! | `ES_DIMENSIONS_FIELD` | dimensions | Dimensions field path |
//!
//! # Example
//!
//! ```rust
//! use kestrel_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     region: Some("useast".to_string()),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use kestrel_persistence::backends::elasticsearch::{
    ElasticsearchAuth, ElasticsearchConfig, SearchSettings,
};
use kestrel_persistence::tenant::RolePolicy;
use kestrel_persistence::types::{DEFAULT_LIMIT, SortDirection};

use crate::extractors::ListLogsOptions;

const DEFAULT_ROLES: &str = "user,domainuser,domainadmin,monasca-user";
const DEFAULT_CORS_HEADERS: &str = "Content-Type,Accept,X-Tenant-Id,X-Roles";

/// Which logs repository the server is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogsDriver {
    /// Elasticsearch-backed repository.
    Elasticsearch,
    /// No repository; listing answers 500.
    None,
}

impl fmt::Display for LogsDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogsDriver::Elasticsearch => write!(f, "elasticsearch"),
            LogsDriver::None => write!(f, "none"),
        }
    }
}

impl FromStr for LogsDriver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elasticsearch" => Ok(LogsDriver::Elasticsearch),
            "none" | "" => Ok(LogsDriver::None),
            other => Err(format!(
                "Unknown logs driver '{}' (expected elasticsearch or none)",
                other
            )),
        }
    }
}

/// Server configuration for the Log API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "kestrel")]
#[command(about = "Multi-tenant Log API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "REST_SERVER_PORT", default_value = "5607")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "REST_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "REST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "REST_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "REST_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_METHODS", default_value = "GET,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_HEADERS", default_value = DEFAULT_CORS_HEADERS)]
    pub cors_headers: String,

    /// Logs repository driver.
    #[arg(long, env = "REST_LOGS_DRIVER", default_value = "elasticsearch")]
    pub logs_driver: String,

    /// Roles allowed to list logs (comma-separated).
    #[arg(long, env = "REST_DEFAULT_ROLES", default_value = DEFAULT_ROLES)]
    pub default_roles: String,

    /// Read-only roles also allowed to list logs (comma-separated).
    #[arg(long, env = "REST_READ_ONLY_ROLES", default_value = "monasca-read-only-user")]
    pub read_only_roles: String,

    /// Roles that may list another tenant's logs via `tenant_id` (comma-separated).
    #[arg(long, env = "REST_DELEGATE_ROLES", default_value = "admin")]
    pub delegate_roles: String,

    /// Restrict every query to this region.
    #[arg(long, env = "REST_REGION")]
    pub region: Option<String>,

    /// Reject unknown query parameters.
    #[arg(long, env = "REST_STRICT_QUERY", default_value = "true")]
    pub strict_query: bool,

    /// Direction used when `sort_by` names a field only (`asc`, `desc` or `none`).
    #[arg(long, env = "REST_DEFAULT_SORT_DIRECTION", default_value = "desc")]
    pub default_sort_direction: String,

    /// Upper bound applied to `limit`.
    #[arg(long, env = "REST_MAX_LIMIT")]
    pub max_limit: Option<u64>,

    /// Elasticsearch node URLs (comma-separated).
    #[arg(long, env = "ES_NODES", default_value = "http://localhost:9200")]
    pub es_nodes: String,

    /// Elasticsearch basic-auth username.
    #[arg(long, env = "ES_USERNAME")]
    pub es_username: Option<String>,

    /// Elasticsearch basic-auth password.
    #[arg(long, env = "ES_PASSWORD", hide_env_values = true)]
    pub es_password: Option<String>,

    /// Elasticsearch request timeout in milliseconds.
    #[arg(long, env = "ES_REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub es_request_timeout_ms: u64,

    /// Disable TLS certificate validation (development only).
    #[arg(long, env = "ES_DISABLE_CERT_VALIDATION", default_value = "false")]
    pub es_disable_cert_validation: bool,

    /// PEM bundle used to validate the Elasticsearch certificate.
    #[arg(long, env = "ES_CA_CERTS")]
    pub es_ca_certs: Option<PathBuf>,

    /// PEM client certificate presented to Elasticsearch.
    #[arg(long, env = "ES_CLIENT_CERT")]
    pub es_client_cert: Option<PathBuf>,

    /// PEM private key for `es_client_cert`.
    #[arg(long, env = "ES_CLIENT_KEY")]
    pub es_client_key: Option<PathBuf>,

    /// Index pattern; must contain `{tenant_id}`.
    #[arg(long, env = "ES_INDEX_PATTERN", default_value = "{tenant_id}-*")]
    pub es_index_pattern: String,

    /// Dotted path of the timestamp field.
    #[arg(long, env = "ES_TIMESTAMP_FIELD", default_value = "@timestamp")]
    pub es_timestamp_field: String,

    /// Dotted path of the message field.
    #[arg(long, env = "ES_MESSAGE_FIELD", default_value = "message")]
    pub es_message_field: String,

    /// Dotted path of the dimensions object.
    #[arg(long, env = "ES_DIMENSIONS_FIELD", default_value = "dimensions")]
    pub es_dimensions_field: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5607,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,OPTIONS".to_string(),
            cors_headers: DEFAULT_CORS_HEADERS.to_string(),
            logs_driver: "elasticsearch".to_string(),
            default_roles: DEFAULT_ROLES.to_string(),
            read_only_roles: "monasca-read-only-user".to_string(),
            delegate_roles: "admin".to_string(),
            region: None,
            strict_query: true,
            default_sort_direction: "desc".to_string(),
            max_limit: None,
            es_nodes: "http://localhost:9200".to_string(),
            es_username: None,
            es_password: None,
            es_request_timeout_ms: 30000,
            es_disable_cert_validation: false,
            es_ca_certs: None,
            es_client_cert: None,
            es_client_key: None,
            es_index_pattern: "{tenant_id}-*".to_string(),
            es_timestamp_field: "@timestamp".to_string(),
            es_message_field: "message".to_string(),
            es_dimensions_field: "dimensions".to_string(),
        }
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the configured logs driver.
    pub fn logs_driver(&self) -> Result<LogsDriver, String> {
        self.logs_driver.parse()
    }

    /// Returns the direction applied when `sort_by` omits one.
    ///
    /// `Ok(None)` means a direction is required.
    pub fn default_sort_direction(&self) -> Result<Option<SortDirection>, String> {
        match self.default_sort_direction.trim() {
            "none" => Ok(None),
            other => other.parse().map(Some).map_err(|_| {
                format!(
                    "Default sort direction '{}' must be asc, desc or none",
                    other
                )
            }),
        }
    }

    /// Builds the role policy from the configured role lists.
    pub fn role_policy(&self) -> RolePolicy {
        RolePolicy::builder()
            .authorized_roles(split_list(&self.default_roles).chain(split_list(&self.read_only_roles)))
            .delegate_roles(split_list(&self.delegate_roles))
            .build()
    }

    /// Builds the options used to normalize listing queries.
    pub fn list_logs_options(&self) -> ListLogsOptions {
        ListLogsOptions {
            policy: self.role_policy(),
            strict: self.strict_query,
            default_sort_direction: self
                .default_sort_direction()
                .unwrap_or(Some(SortDirection::Desc)),
            default_limit: DEFAULT_LIMIT,
            max_limit: self.max_limit,
        }
    }

    /// Returns the index layout settings.
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            index_pattern: self.es_index_pattern.clone(),
            timestamp_field: self.es_timestamp_field.clone(),
            message_field: self.es_message_field.clone(),
            dimensions_field: self.es_dimensions_field.clone(),
            region: self.region.clone(),
        }
    }

    /// Returns the Elasticsearch client configuration.
    pub fn elasticsearch_config(&self) -> ElasticsearchConfig {
        let auth = match (&self.es_username, &self.es_password) {
            (Some(username), Some(password)) => Some(ElasticsearchAuth::Basic {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        };

        ElasticsearchConfig {
            nodes: split_list(&self.es_nodes).map(String::from).collect(),
            request_timeout_ms: self.es_request_timeout_ms,
            auth,
            disable_certificate_validation: self.es_disable_cert_validation,
            ca_certs: self.es_ca_certs.clone(),
            client_cert: self.es_client_cert.clone(),
            client_key: self.es_client_key.clone(),
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if let Err(e) = self.logs_driver() {
            errors.push(e);
        }

        if let Err(e) = self.default_sort_direction() {
            errors.push(e);
        }

        if self.max_limit == Some(0) {
            errors.push("Max limit cannot be 0".to_string());
        }

        if let Err(e) = self.search_settings().validate() {
            errors.push(e.to_string());
        }

        if self.es_username.is_some() != self.es_password.is_some() {
            errors.push("ES username and password must be set together".to_string());
        }

        if self.es_client_cert.is_some() != self.es_client_key.is_some() {
            errors.push("ES client certificate and key must be set together".to_string());
        } else if self.es_client_cert.is_some() && self.es_username.is_some() {
            errors.push("ES client certificate cannot be combined with basic auth".to_string());
        }

        if split_list(&self.es_nodes).next().is_none() {
            errors.push("At least one ES node is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            ..Default::default()
        }
    }
}
