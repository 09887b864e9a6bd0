//! [`SearchClient`] backed by the official `elasticsearch` crate.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use elasticsearch::auth::{ClientCertificate, Credentials};
use elasticsearch::cert::{Certificate, CertificateValidation};
use elasticsearch::cluster::ClusterHealthParts;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::{Elasticsearch, SearchParts};
use openssl::pkcs12::Pkcs12;
use openssl::pkey::PKey;
use openssl::stack::Stack;
use openssl::x509::X509;
use serde_json::Value;

use crate::core::{SearchClient, SearchRequest};
use crate::error::BackendError;

use super::config::{ElasticsearchAuth, ElasticsearchConfig};

const BACKEND_NAME: &str = "elasticsearch";

fn connection_failed(message: String) -> BackendError {
    BackendError::ConnectionFailed {
        backend_name: BACKEND_NAME.to_string(),
        message,
    }
}

/// HTTP client for an Elasticsearch cluster.
pub struct ElasticsearchClient {
    client: Elasticsearch,
    config: ElasticsearchConfig,
}

impl Debug for ElasticsearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchClient")
            .field("nodes", &self.config.nodes)
            .field("request_timeout_ms", &self.config.request_timeout_ms)
            .finish_non_exhaustive()
    }
}

impl ElasticsearchClient {
    /// Creates a client with the given configuration.
    ///
    /// No request is sent; an unreachable cluster surfaces on first use.
    pub fn new(config: ElasticsearchConfig) -> Result<Self, BackendError> {
        let client = Self::build_client(&config)?;
        Ok(Self { client, config })
    }

    /// Builds the Elasticsearch client from configuration.
    fn build_client(config: &ElasticsearchConfig) -> Result<Elasticsearch, BackendError> {
        let url = config
            .nodes
            .first()
            .cloned()
            .unwrap_or_else(|| "http://localhost:9200".to_string());

        if config.nodes.len() > 1 {
            tracing::warn!(
                nodes = config.nodes.len(),
                using = %url,
                "Multiple Elasticsearch nodes configured; only the first is used"
            );
        }

        let parsed_url: elasticsearch::http::Url = url
            .parse()
            .map_err(|e| connection_failed(format!("Invalid URL {}: {}", url, e)))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);

        let mut builder = TransportBuilder::new(conn_pool)
            .timeout(Duration::from_millis(config.request_timeout_ms));

        if config.disable_certificate_validation {
            builder = builder.cert_validation(CertificateValidation::None);
        } else if let Some(ref path) = config.ca_certs {
            let pem = std::fs::read(path).map_err(|e| {
                connection_failed(format!("Failed to read CA bundle {}: {}", path.display(), e))
            })?;
            let cert = Certificate::from_pem(&pem).map_err(|e| {
                connection_failed(format!("Invalid CA bundle {}: {}", path.display(), e))
            })?;
            builder = builder.cert_validation(CertificateValidation::Full(cert));
        }

        // The transport holds a single credential, so a client certificate
        // cannot be combined with header authentication.
        let credentials = match (&config.client_cert, &config.client_key, &config.auth) {
            (Some(_), Some(_), Some(_)) => {
                return Err(connection_failed(
                    "Client certificate cannot be combined with username/password or token \
                     authentication"
                        .to_string(),
                ));
            }
            (Some(cert), Some(key), None) => Some(Credentials::from(
                ClientCertificate::Pkcs12(client_identity(cert, key)?, None),
            )),
            (Some(_), None, _) | (None, Some(_), _) => {
                return Err(connection_failed(
                    "Client certificate and client key must be configured together".to_string(),
                ));
            }
            (None, None, Some(ElasticsearchAuth::Basic { username, password })) => {
                Some(Credentials::Basic(username.clone(), password.clone()))
            }
            (None, None, Some(ElasticsearchAuth::Bearer { token })) => {
                Some(Credentials::Bearer(token.clone()))
            }
            (None, None, None) => None,
        };

        if let Some(credentials) = credentials {
            builder = builder.auth(credentials);
        }

        let transport = builder
            .build()
            .map_err(|e| connection_failed(format!("Failed to build transport: {}", e)))?;

        Ok(Elasticsearch::new(transport))
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ElasticsearchConfig {
        &self.config
    }
}

/// Packs a PEM certificate chain and private key into a PKCS#12 archive.
///
/// The first certificate in `cert_path` is the leaf; the rest form its chain.
fn client_identity(cert_path: &Path, key_path: &Path) -> Result<Vec<u8>, BackendError> {
    let read = |path: &Path, what: &str| {
        std::fs::read(path).map_err(|e| {
            connection_failed(format!("Failed to read {} {}: {}", what, path.display(), e))
        })
    };
    let cert_pem = read(cert_path, "client certificate")?;
    let key_pem = read(key_path, "client key")?;

    let mut certs = X509::stack_from_pem(&cert_pem)
        .map_err(|e| {
            connection_failed(format!(
                "Invalid client certificate {}: {}",
                cert_path.display(),
                e
            ))
        })?
        .into_iter();
    let leaf = certs.next().ok_or_else(|| {
        connection_failed(format!(
            "No certificate found in {}",
            cert_path.display()
        ))
    })?;
    let key = PKey::private_key_from_pem(&key_pem).map_err(|e| {
        connection_failed(format!("Invalid client key {}: {}", key_path.display(), e))
    })?;

    let invalid_identity = |e: openssl::error::ErrorStack| {
        connection_failed(format!("Failed to build client identity: {}", e))
    };
    let mut chain = Stack::new().map_err(invalid_identity)?;
    for cert in certs {
        chain.push(cert).map_err(invalid_identity)?;
    }

    Pkcs12::builder()
        .name("kestrel")
        .pkey(&key)
        .cert(&leaf)
        .ca(chain)
        .build2("")
        .and_then(|archive| archive.to_der())
        .map_err(invalid_identity)
}

#[async_trait]
impl SearchClient for ElasticsearchClient {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn search(&self, request: &SearchRequest) -> Result<Value, BackendError> {
        let index = request.index_name.as_str();

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(request.body())
            .send()
            .await?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::QueryError {
                message: format!("Search on {} returned status {}: {}", index, status, body),
            });
        }

        Ok(response.json::<Value>().await?)
    }

    async fn ping(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("Health check failed: {}", e),
            })?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(BackendError::Unavailable {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("Cluster health returned status {}", status),
            });
        }

        let body = response.json::<Value>().await?;

        let cluster_status = body
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        if cluster_status == "red" {
            return Err(BackendError::Unavailable {
                backend_name: BACKEND_NAME.to_string(),
                message: "Cluster status is red".to_string(),
            });
        }

        Ok(())
    }
}
