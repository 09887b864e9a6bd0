//! Application state for the Log API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the logs repository (if one is configured), the server
//! configuration, and the options derived from it.

use std::sync::Arc;

use kestrel_persistence::core::LogsRepository;

use crate::config::ServerConfig;
use crate::extractors::ListLogsOptions;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `R` - The repository type (must implement [`LogsRepository`])
///
/// # Example
///
/// ```rust,ignore
/// use kestrel_rest::{AppState, ServerConfig};
/// use std::sync::Arc;
///
/// let state = AppState::new(Some(Arc::new(repository)), ServerConfig::default());
/// ```
pub struct AppState<R> {
    /// The logs repository, absent when no driver is configured.
    repository: Option<Arc<R>>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Query normalization options, built once from the configuration.
    options: Arc<ListLogsOptions>,
}

// Manually implement Clone since R is wrapped in Arc and doesn't need to be Clone
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            config: Arc::clone(&self.config),
            options: Arc::clone(&self.options),
        }
    }
}

impl<R: LogsRepository> AppState<R> {
    /// Creates a new AppState with the given repository and configuration.
    ///
    /// # Arguments
    ///
    /// * `repository` - The logs repository, or `None` when not configured
    /// * `config` - Server configuration
    pub fn new(repository: Option<Arc<R>>, config: ServerConfig) -> Self {
        let options = config.list_logs_options();
        Self {
            repository,
            config: Arc::new(config),
            options: Arc::new(options),
        }
    }

    /// Returns the repository, if configured.
    pub fn repository(&self) -> Option<&R> {
        self.repository.as_deref()
    }

    /// Returns the backend name, or `"none"` without a repository.
    pub fn backend_name(&self) -> &'static str {
        self.repository
            .as_ref()
            .map(|r| r.backend_name())
            .unwrap_or("none")
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the query normalization options.
    pub fn list_logs_options(&self) -> &ListLogsOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kestrel_persistence::error::StorageResult;
    use kestrel_persistence::types::{ListLogsQuery, LogRecord};

    // Mock repository for testing
    struct MockRepository;

    #[async_trait]
    impl LogsRepository for MockRepository {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn list_logs(&self, _query: &ListLogsQuery) -> StorageResult<Vec<LogRecord>> {
            unimplemented!()
        }

        async fn health_check(&self) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new(Some(Arc::new(MockRepository)), ServerConfig::default());

        assert!(state.repository().is_some());
        assert_eq!(state.backend_name(), "mock");
    }

    #[test]
    fn test_app_state_without_repository() {
        let state: AppState<MockRepository> = AppState::new(None, ServerConfig::default());

        assert!(state.repository().is_none());
        assert_eq!(state.backend_name(), "none");
    }

    #[test]
    fn test_app_state_options_follow_config() {
        let config = ServerConfig {
            strict_query: false,
            max_limit: Some(100),
            ..Default::default()
        };
        let state = AppState::new(Some(Arc::new(MockRepository)), config);

        assert!(!state.list_logs_options().strict);
        assert_eq!(state.list_logs_options().max_limit, Some(100));
    }

    #[test]
    fn test_app_state_clone() {
        let state = AppState::new(Some(Arc::new(MockRepository)), ServerConfig::default());
        let cloned = state.clone();

        assert_eq!(state.config().port, cloned.config().port);
    }
}
