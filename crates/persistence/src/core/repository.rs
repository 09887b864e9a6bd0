//! Logs repository trait.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{ListLogsQuery, LogRecord};

/// Read access to indexed logs.
///
/// This is the single entry point the HTTP layer uses. Implementations must
/// report every backend failure as a [`StorageError`](crate::StorageError);
/// library-specific error types never cross this boundary.
#[async_trait]
pub trait LogsRepository: Send + Sync {
    /// Returns a human-readable name for the backend.
    fn backend_name(&self) -> &'static str;

    /// Lists logs matching the query.
    async fn list_logs(&self, query: &ListLogsQuery) -> StorageResult<Vec<LogRecord>>;

    /// Checks that the underlying backend is reachable.
    async fn health_check(&self) -> StorageResult<()>;
}

/// Repository type for an application serving without a backend.
///
/// Has no values; an application typed over it always holds `None`.
#[derive(Debug, Clone, Copy)]
pub enum Unconfigured {}

#[async_trait]
impl LogsRepository for Unconfigured {
    fn backend_name(&self) -> &'static str {
        match *self {}
    }

    async fn list_logs(&self, _query: &ListLogsQuery) -> StorageResult<Vec<LogRecord>> {
        match *self {}
    }

    async fn health_check(&self) -> StorageResult<()> {
        match *self {}
    }
}
