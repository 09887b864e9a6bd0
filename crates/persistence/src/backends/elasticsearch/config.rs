//! Elasticsearch connection and index layout configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Placeholder substituted with the tenant id in index patterns.
pub const TENANT_PLACEHOLDER: &str = "{tenant_id}";

/// Authentication configuration for Elasticsearch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ElasticsearchAuth {
    /// Basic username/password authentication.
    Basic {
        /// The username for basic auth.
        username: String,
        /// The password for basic auth.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The bearer token.
        token: String,
    },
}

/// Connection settings for the Elasticsearch client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticsearchConfig {
    /// Elasticsearch node URLs (e.g., `["http://localhost:9200"]`).
    /// Currently uses the first node (single-node connection pool).
    #[serde(default = "default_nodes")]
    pub nodes: Vec<String>,

    /// Request timeout in milliseconds (default: 30000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional authentication.
    #[serde(default)]
    pub auth: Option<ElasticsearchAuth>,

    /// Whether to disable certificate validation (default: false).
    /// Only use for development/testing.
    #[serde(default)]
    pub disable_certificate_validation: bool,

    /// PEM bundle used to validate the server certificate.
    #[serde(default)]
    pub ca_certs: Option<PathBuf>,

    /// PEM client certificate for mutual TLS. Requires `client_key`.
    /// Any certificates after the first are sent as the chain.
    #[serde(default)]
    pub client_cert: Option<PathBuf>,

    /// PEM private key matching `client_cert`.
    #[serde(default)]
    pub client_key: Option<PathBuf>,
}

fn default_nodes() -> Vec<String> {
    vec!["http://localhost:9200".to_string()]
}

fn default_request_timeout_ms() -> u64 {
    30000
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            request_timeout_ms: default_request_timeout_ms(),
            auth: None,
            disable_certificate_validation: false,
            ca_certs: None,
            client_cert: None,
            client_key: None,
        }
    }
}

/// Where logs live in the index and how their documents are shaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Index pattern; `{tenant_id}` is replaced per query.
    #[serde(default = "default_index_pattern")]
    pub index_pattern: String,

    /// Dotted path of the timestamp field.
    #[serde(default = "default_timestamp_field")]
    pub timestamp_field: String,

    /// Dotted path of the message field.
    #[serde(default = "default_message_field")]
    pub message_field: String,

    /// Dotted path of the object holding dimensions.
    #[serde(default = "default_dimensions_field")]
    pub dimensions_field: String,

    /// Fixed region every query is restricted to.
    #[serde(default)]
    pub region: Option<String>,
}

fn default_index_pattern() -> String {
    format!("{}-*", TENANT_PLACEHOLDER)
}

fn default_timestamp_field() -> String {
    "@timestamp".to_string()
}

fn default_message_field() -> String {
    "message".to_string()
}

fn default_dimensions_field() -> String {
    "dimensions".to_string()
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            index_pattern: default_index_pattern(),
            timestamp_field: default_timestamp_field(),
            message_field: default_message_field(),
            dimensions_field: default_dimensions_field(),
            region: None,
        }
    }
}

impl SearchSettings {
    /// Checks the settings for deployment mistakes.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.index_pattern.contains(TENANT_PLACEHOLDER) {
            return Err(ConfigurationError::InvalidIndexPattern {
                pattern: self.index_pattern.clone(),
            });
        }

        for (name, value) in [
            ("timestamp_field", &self.timestamp_field),
            ("message_field", &self.message_field),
            ("dimensions_field", &self.dimensions_field),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigurationError::InvalidSetting {
                    name: name.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SearchSettings::default();
        assert_eq!(settings.index_pattern, "{tenant_id}-*");
        assert_eq!(settings.timestamp_field, "@timestamp");
        assert_eq!(settings.dimensions_field, "dimensions");
        assert!(settings.validate().is_ok());

        let config = ElasticsearchConfig::default();
        assert_eq!(config.nodes, vec!["http://localhost:9200"]);
        assert_eq!(config.request_timeout_ms, 30000);
        assert!(config.client_cert.is_none());
    }

    #[test]
    fn test_client_certificate_paths_deserialize() {
        let config: ElasticsearchConfig = serde_json::from_str(
            r#"{"client_cert": "/etc/kestrel/client.pem", "client_key": "/etc/kestrel/client.key"}"#,
        )
        .unwrap();
        assert_eq!(
            config.client_cert,
            Some(PathBuf::from("/etc/kestrel/client.pem"))
        );
        assert_eq!(
            config.client_key,
            Some(PathBuf::from("/etc/kestrel/client.key"))
        );
        assert_eq!(config.nodes, vec!["http://localhost:9200"]);
    }

    #[test]
    fn test_pattern_without_placeholder_rejected() {
        let settings = SearchSettings {
            index_pattern: "logs-*".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigurationError::InvalidIndexPattern {
                pattern: "logs-*".to_string()
            })
        );
    }

    #[test]
    fn test_empty_field_rejected() {
        let settings = SearchSettings {
            message_field: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidSetting { name, .. }) if name == "message_field"
        ));
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let settings: SearchSettings =
            serde_json::from_str(r#"{"region": "useast"}"#).unwrap();
        assert_eq!(settings.region.as_deref(), Some("useast"));
        assert_eq!(settings.message_field, "message");
    }
}
